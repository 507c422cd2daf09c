use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::{payment_histories, transactions};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = transactions)]
pub struct TransactionEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub amount_minor: i64,
    pub payment_type: String,
    pub payment_method: String,
    pub status: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
pub struct InsertTransactionEntity {
    pub user_id: Uuid,
    pub amount_minor: i64,
    pub payment_type: String,
    pub payment_method: String,
    pub status: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payment_histories)]
pub struct PaymentHistoryEntity {
    pub id: i64,
    pub transaction_id: i64,
    pub user_id: Uuid,
    pub amount_minor: i64,
    pub receipt_url: Option<String>,
    pub date_paid: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payment_histories)]
pub struct InsertPaymentHistoryEntity {
    pub transaction_id: i64,
    pub user_id: Uuid,
    pub amount_minor: i64,
    pub receipt_url: Option<String>,
    pub date_paid: DateTime<Utc>,
}
