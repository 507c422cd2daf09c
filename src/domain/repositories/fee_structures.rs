use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::fee_structures::{FeeStructureEntity, InsertFeeStructureEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeeStructureRepository {
    async fn insert(
        &self,
        insert_fee_structure_entity: InsertFeeStructureEntity,
    ) -> Result<FeeStructureEntity>;

    /// Most-recently-created snapshot for the account. Payments are only ever
    /// validated against this row.
    async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<FeeStructureEntity>>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FeeStructureEntity>>;
}
