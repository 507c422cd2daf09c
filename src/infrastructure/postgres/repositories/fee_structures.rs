use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::fee_structures::{FeeStructureEntity, InsertFeeStructureEntity},
        repositories::fee_structures::FeeStructureRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::fee_structures},
};

pub struct FeeStructurePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl FeeStructurePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl FeeStructureRepository for FeeStructurePostgres {
    async fn insert(
        &self,
        insert_fee_structure_entity: InsertFeeStructureEntity,
    ) -> Result<FeeStructureEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(fee_structures::table)
            .values(&insert_fee_structure_entity)
            .returning(FeeStructureEntity::as_returning())
            .get_result::<FeeStructureEntity>(&mut conn)?;

        Ok(result)
    }

    async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<FeeStructureEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = fee_structures::table
            .filter(fee_structures::user_id.eq(user_id))
            .order(fee_structures::created_at.desc())
            .select(FeeStructureEntity::as_select())
            .first::<FeeStructureEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FeeStructureEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = fee_structures::table
            .filter(fee_structures::user_id.eq(user_id))
            .order(fee_structures::created_at.desc())
            .select(FeeStructureEntity::as_select())
            .load::<FeeStructureEntity>(&mut conn)?;

        Ok(results)
    }
}
