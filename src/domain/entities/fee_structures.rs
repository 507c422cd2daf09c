use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::enums::fee_categories::FeeCategory,
    infrastructure::postgres::schema::fee_structures,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = fee_structures)]
pub struct FeeStructureEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub academic_year: String,
    pub tuition_minor: i64,
    pub hostel_minor: i64,
    pub other_minor: i64,
    pub tuition_due_date: Option<NaiveDate>,
    pub hostel_due_date: Option<NaiveDate>,
    pub other_due_date: Option<NaiveDate>,
    pub total_fee_minor: i64,
    pub created_at: DateTime<Utc>,
}

impl FeeStructureEntity {
    pub fn required_for(&self, category: FeeCategory) -> i64 {
        match category {
            FeeCategory::Tuition => self.tuition_minor,
            FeeCategory::Hostel => self.hostel_minor,
            FeeCategory::Other => self.other_minor,
        }
    }

    pub fn due_date_for(&self, category: FeeCategory) -> Option<NaiveDate> {
        match category {
            FeeCategory::Tuition => self.tuition_due_date,
            FeeCategory::Hostel => self.hostel_due_date,
            FeeCategory::Other => self.other_due_date,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fee_structures)]
pub struct InsertFeeStructureEntity {
    pub user_id: Uuid,
    pub academic_year: String,
    pub tuition_minor: i64,
    pub hostel_minor: i64,
    pub other_minor: i64,
    pub tuition_due_date: Option<NaiveDate>,
    pub hostel_due_date: Option<NaiveDate>,
    pub other_due_date: Option<NaiveDate>,
    pub total_fee_minor: i64,
    pub created_at: DateTime<Utc>,
}

impl InsertFeeStructureEntity {
    /// Builds a snapshot with `total_fee_minor` derived from the category
    /// amounts. The total is never settable on its own.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        academic_year: String,
        tuition_minor: i64,
        hostel_minor: i64,
        other_minor: i64,
        tuition_due_date: Option<NaiveDate>,
        hostel_due_date: Option<NaiveDate>,
        other_due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            user_id,
            academic_year,
            tuition_minor,
            hostel_minor,
            other_minor,
            tuition_due_date,
            hostel_due_date,
            other_due_date,
            total_fee_minor: tuition_minor + hostel_minor + other_minor,
            created_at: Utc::now(),
        }
    }
}
