use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::transactions::{PaymentHistoryEntity, TransactionEntity},
    value_objects::enums::{
        fee_categories::FeeCategory, payment_methods::PaymentMethod,
        transaction_statuses::TransactionStatus,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPaymentModel {
    pub amount_minor: i64,
    pub payment_type: FeeCategory,
    pub payment_method: PaymentMethod,
    pub phone_number: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionModel {
    pub id: i64,
    pub amount_minor: i64,
    pub payment_type: FeeCategory,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionEntity> for TransactionModel {
    fn from(entity: TransactionEntity) -> Self {
        Self {
            id: entity.id,
            amount_minor: entity.amount_minor,
            payment_type: FeeCategory::from_str(&entity.payment_type)
                .unwrap_or(FeeCategory::Other),
            payment_method: PaymentMethod::from_str(&entity.payment_method)
                .unwrap_or(PaymentMethod::MobileMoney),
            status: TransactionStatus::from_str(&entity.status).unwrap_or_default(),
            reference: entity.reference,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentHistoryModel {
    pub id: i64,
    pub transaction_id: i64,
    pub amount_minor: i64,
    pub receipt_url: Option<String>,
    pub date_paid: DateTime<Utc>,
}

impl From<PaymentHistoryEntity> for PaymentHistoryModel {
    fn from(entity: PaymentHistoryEntity) -> Self {
        Self {
            id: entity.id,
            transaction_id: entity.transaction_id,
            amount_minor: entity.amount_minor,
            receipt_url: entity.receipt_url,
            date_paid: entity.date_paid,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceiptDto {
    pub message: String,
    pub reference: String,
    pub transaction_id: i64,
    pub amount_minor: i64,
    pub payment_type: FeeCategory,
    pub status: TransactionStatus,
    pub balance_minor: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionStatsDto {
    pub total_collected_minor: i64,
    pub completed_count: i64,
}
