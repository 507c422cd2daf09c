use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::fee_catalog_entries;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = fee_catalog_entries)]
pub struct FeeCatalogEntryEntity {
    pub id: i64,
    pub program: String,
    pub level: String,
    pub tuition_minor: i64,
    pub hostel_minor: i64,
    pub other_minor: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fee_catalog_entries)]
pub struct UpsertFeeCatalogEntryEntity {
    pub program: String,
    pub level: String,
    pub tuition_minor: i64,
    pub hostel_minor: i64,
    pub other_minor: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
