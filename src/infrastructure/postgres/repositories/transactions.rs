use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::transactions::{
            InsertPaymentHistoryEntity, InsertTransactionEntity, PaymentHistoryEntity,
            TransactionEntity,
        },
        repositories::transactions::TransactionRepository,
        value_objects::enums::transaction_statuses::TransactionStatus,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{payment_histories, transactions},
    },
};

pub struct TransactionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TransactionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TransactionRepository for TransactionPostgres {
    async fn record_completed(
        &self,
        insert_transaction_entity: InsertTransactionEntity,
        receipt_url: Option<String>,
    ) -> Result<TransactionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let transaction = conn.transaction::<TransactionEntity, diesel::result::Error, _>(|conn| {
            let transaction = insert_into(transactions::table)
                .values(&insert_transaction_entity)
                .returning(TransactionEntity::as_returning())
                .get_result::<TransactionEntity>(conn)?;

            let history = InsertPaymentHistoryEntity {
                transaction_id: transaction.id,
                user_id: transaction.user_id,
                amount_minor: transaction.amount_minor,
                receipt_url,
                date_paid: transaction.created_at,
            };
            insert_into(payment_histories::table)
                .values(&history)
                .execute(conn)?;

            Ok(transaction)
        })?;

        Ok(transaction)
    }

    async fn list_completed_by_user(&self, user_id: Uuid) -> Result<Vec<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::status.eq(TransactionStatus::Completed.to_string()))
            .order(transactions::created_at.desc())
            .select(TransactionEntity::as_select())
            .load::<TransactionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_all_completed(&self) -> Result<Vec<TransactionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = transactions::table
            .filter(transactions::status.eq(TransactionStatus::Completed.to_string()))
            .order(transactions::created_at.desc())
            .select(TransactionEntity::as_select())
            .load::<TransactionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_histories_by_user(&self, user_id: Uuid) -> Result<Vec<PaymentHistoryEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = payment_histories::table
            .filter(payment_histories::user_id.eq(user_id))
            .order(payment_histories::date_paid.desc())
            .select(PaymentHistoryEntity::as_select())
            .load::<PaymentHistoryEntity>(&mut conn)?;

        Ok(results)
    }
}
