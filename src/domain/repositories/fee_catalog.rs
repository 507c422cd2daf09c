use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::fee_catalog::{FeeCatalogEntryEntity, UpsertFeeCatalogEntryEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeeCatalogRepository {
    /// Inserts or replaces the entry for its (program, level) key.
    async fn upsert(&self, entry: UpsertFeeCatalogEntryEntity) -> Result<FeeCatalogEntryEntity>;
    async fn find(&self, program: &str, level: &str) -> Result<Option<FeeCatalogEntryEntity>>;
}
