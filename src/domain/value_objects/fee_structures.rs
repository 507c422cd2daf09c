use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{
        fee_catalog::FeeCatalogEntryEntity, fee_structures::FeeStructureEntity,
        transactions::TransactionEntity,
    },
    value_objects::enums::{
        fee_categories::FeeCategory, transaction_statuses::TransactionStatus,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeStructureModel {
    pub id: i64,
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

impl From<FeeStructureEntity> for FeeStructureModel {
    fn from(entity: FeeStructureEntity) -> Self {
        Self {
            id: entity.id,
            academic_year: entity.academic_year,
            tuition_minor: entity.tuition_minor,
            hostel_minor: entity.hostel_minor,
            other_minor: entity.other_minor,
            tuition_due_date: entity.tuition_due_date,
            hostel_due_date: entity.hostel_due_date,
            other_due_date: entity.other_due_date,
            total_fee_minor: entity.total_fee_minor,
            created_at: entity.created_at,
        }
    }
}

/// Admin request to assign a fee-structure snapshot to a student. Amounts
/// left out fall back to the fee-catalog defaults for the student's
/// (program, level).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignFeeStructureModel {
    pub student_id: String,
    pub academic_year: String,
    pub tuition_minor: Option<i64>,
    pub hostel_minor: Option<i64>,
    pub other_minor: Option<i64>,
    pub tuition_due_date: Option<NaiveDate>,
    pub hostel_due_date: Option<NaiveDate>,
    pub other_due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertFeeCatalogModel {
    pub program: String,
    pub level: String,
    pub tuition_minor: i64,
    pub hostel_minor: i64,
    pub other_minor: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeCatalogEntryModel {
    pub id: i64,
    pub program: String,
    pub level: String,
    pub tuition_minor: i64,
    pub hostel_minor: i64,
    pub other_minor: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<FeeCatalogEntryEntity> for FeeCatalogEntryModel {
    fn from(entity: FeeCatalogEntryEntity) -> Self {
        Self {
            id: entity.id,
            program: entity.program,
            level: entity.level,
            tuition_minor: entity.tuition_minor,
            hostel_minor: entity.hostel_minor,
            other_minor: entity.other_minor,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryBreakdown {
    pub category: FeeCategory,
    pub required_minor: i64,
    pub paid_minor: i64,
    pub outstanding_minor: i64,
    pub due_date: Option<NaiveDate>,
    pub paid_in_full: bool,
}

/// Owed/paid/outstanding view over one fee-structure snapshot and the
/// account's completed transactions. Pending and failed transactions never
/// contribute to any of the sums.
#[derive(Debug, Clone, Serialize)]
pub struct FeeBreakdown {
    pub academic_year: String,
    pub total_fee_minor: i64,
    pub total_paid_minor: i64,
    pub balance_minor: i64,
    pub fully_paid: bool,
    pub categories: Vec<CategoryBreakdown>,
}

impl FeeBreakdown {
    pub fn compute(structure: &FeeStructureEntity, transactions: &[TransactionEntity]) -> Self {
        let total_paid = total_paid(transactions);
        let categories = FeeCategory::ALL
            .iter()
            .map(|&category| {
                let required = structure.required_for(category);
                let paid = paid_by_type(transactions, category);
                CategoryBreakdown {
                    category,
                    required_minor: required,
                    paid_minor: paid,
                    outstanding_minor: (required - paid).max(0),
                    due_date: structure.due_date_for(category),
                    paid_in_full: paid >= required,
                }
            })
            .collect();

        Self {
            academic_year: structure.academic_year.clone(),
            total_fee_minor: structure.total_fee_minor,
            total_paid_minor: total_paid,
            balance_minor: (structure.total_fee_minor - total_paid).max(0),
            fully_paid: total_paid >= structure.total_fee_minor,
            categories,
        }
    }

    /// Categories still carrying an outstanding amount, with their due dates.
    pub fn pending_by_category(&self) -> Vec<CategoryBreakdown> {
        self.categories
            .iter()
            .filter(|breakdown| !breakdown.paid_in_full)
            .cloned()
            .collect()
    }
}

fn is_completed(transaction: &TransactionEntity) -> bool {
    TransactionStatus::from_str(&transaction.status) == Some(TransactionStatus::Completed)
}

/// Sum of completed amounts in one category. Zero when none.
pub fn paid_by_type(transactions: &[TransactionEntity], category: FeeCategory) -> i64 {
    transactions
        .iter()
        .filter(|transaction| is_completed(transaction))
        .filter(|transaction| transaction.payment_type == category.to_string())
        .map(|transaction| transaction.amount_minor)
        .sum()
}

/// Sum of completed amounts across all categories.
pub fn total_paid(transactions: &[TransactionEntity]) -> i64 {
    transactions
        .iter()
        .filter(|transaction| is_completed(transaction))
        .map(|transaction| transaction.amount_minor)
        .sum()
}

pub fn is_category_paid(
    structure: &FeeStructureEntity,
    transactions: &[TransactionEntity],
    category: FeeCategory,
) -> bool {
    paid_by_type(transactions, category) >= structure.required_for(category)
}
