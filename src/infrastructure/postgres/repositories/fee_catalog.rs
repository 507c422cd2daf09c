use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};

use crate::{
    domain::{
        entities::fee_catalog::{FeeCatalogEntryEntity, UpsertFeeCatalogEntryEntity},
        repositories::fee_catalog::FeeCatalogRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::fee_catalog_entries},
};

pub struct FeeCatalogPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl FeeCatalogPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl FeeCatalogRepository for FeeCatalogPostgres {
    async fn upsert(&self, entry: UpsertFeeCatalogEntryEntity) -> Result<FeeCatalogEntryEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // (program, level) carries a unique constraint.
        let result = insert_into(fee_catalog_entries::table)
            .values(&entry)
            .on_conflict((fee_catalog_entries::program, fee_catalog_entries::level))
            .do_update()
            .set((
                fee_catalog_entries::tuition_minor.eq(entry.tuition_minor),
                fee_catalog_entries::hostel_minor.eq(entry.hostel_minor),
                fee_catalog_entries::other_minor.eq(entry.other_minor),
                fee_catalog_entries::updated_at.eq(entry.updated_at),
            ))
            .returning(FeeCatalogEntryEntity::as_returning())
            .get_result::<FeeCatalogEntryEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find(&self, program: &str, level: &str) -> Result<Option<FeeCatalogEntryEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = fee_catalog_entries::table
            .filter(fee_catalog_entries::program.eq(program))
            .filter(fee_catalog_entries::level.eq(level))
            .select(FeeCatalogEntryEntity::as_select())
            .first::<FeeCatalogEntryEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
