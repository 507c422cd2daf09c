use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::transactions::{
    InsertTransactionEntity, PaymentHistoryEntity, TransactionEntity,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository {
    /// Writes the completed transaction and its payment-history row in one
    /// database transaction. Either both rows land or neither does.
    async fn record_completed(
        &self,
        insert_transaction_entity: InsertTransactionEntity,
        receipt_url: Option<String>,
    ) -> Result<TransactionEntity>;

    async fn list_completed_by_user(&self, user_id: Uuid) -> Result<Vec<TransactionEntity>>;
    async fn list_all_completed(&self) -> Result<Vec<TransactionEntity>>;
    async fn list_histories_by_user(&self, user_id: Uuid) -> Result<Vec<PaymentHistoryEntity>>;
}
