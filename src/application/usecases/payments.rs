use std::{collections::HashMap, sync::Arc};

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::transactions::InsertTransactionEntity,
    repositories::{
        fee_structures::FeeStructureRepository, transactions::TransactionRepository,
    },
    value_objects::{
        enums::transaction_statuses::TransactionStatus,
        fee_structures::{self, CategoryBreakdown, FeeBreakdown},
        transactions::{
            CollectionStatsDto, PaymentHistoryModel, PaymentReceiptDto, SubmitPaymentModel,
            TransactionModel,
        },
    },
};

/// Broadcast group that receives an event for every successful payment.
pub const PAYMENT_EVENTS_GROUP: &str = "payments";

/// Fire-and-forget sink for payment events. The ledger never talks to the
/// real-time delivery component directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, group: &str, message: &str) -> AnyResult<()>;
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("no fee structure assigned to this account")]
    NoFeeStructure,
    #[error("{category} fees are already fully paid")]
    CategoryAlreadyPaid { category: String },
    #[error("amount must equal the remaining balance: required {required_minor}, submitted {submitted_minor}")]
    AmountMismatch {
        required_minor: i64,
        submitted_minor: i64,
    },
    #[error("payment would exceed the total fee for this structure")]
    ExceedsTotalFee,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::NoFeeStructure
            | PaymentError::CategoryAlreadyPaid { .. }
            | PaymentError::AmountMismatch { .. }
            | PaymentError::ExceedsTotalFee => StatusCode::BAD_REQUEST,
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentResult<T> = std::result::Result<T, PaymentError>;

pub struct PaymentUseCase<T, F, N>
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    transaction_repo: Arc<T>,
    fee_structure_repo: Arc<F>,
    notifier: Arc<N>,
    // Serializes validate-and-persist per account so two concurrent
    // submissions cannot both pass validation against stale sums.
    account_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl<T, F, N> PaymentUseCase<T, F, N>
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(transaction_repo: Arc<T>, fee_structure_repo: Arc<F>, notifier: Arc<N>) -> Self {
        Self {
            transaction_repo,
            fee_structure_repo,
            notifier,
            account_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn account_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.account_locks.lock().await;
        Arc::clone(locks.entry(user_id).or_default())
    }

    pub async fn submit_payment(
        &self,
        user_id: Uuid,
        submit_payment_model: SubmitPaymentModel,
    ) -> PaymentResult<PaymentReceiptDto> {
        let category = submit_payment_model.payment_type;
        info!(
            %user_id,
            payment_type = %category,
            amount_minor = submit_payment_model.amount_minor,
            "payments: payment submission received"
        );

        let lock = self.account_lock(user_id).await;
        let _guard = lock.lock().await;

        let structure = self
            .fee_structure_repo
            .latest_for_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payments: failed to load latest fee structure");
                PaymentError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PaymentError::NoFeeStructure;
                warn!(%user_id, status = err.status_code().as_u16(), "payments: no fee structure");
                err
            })?;

        let completed = self
            .transaction_repo
            .list_completed_by_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "payments: failed to load completed transactions");
                PaymentError::Internal(err)
            })?;

        if fee_structures::is_category_paid(&structure, &completed, category) {
            let err = PaymentError::CategoryAlreadyPaid {
                category: category.to_string(),
            };
            warn!(
                %user_id,
                payment_type = %category,
                status = err.status_code().as_u16(),
                "payments: category already fully paid"
            );
            return Err(err);
        }

        // Remaining balance computed from other already-completed
        // transactions only; this submission is not part of its own sum.
        let remaining =
            structure.required_for(category) - fee_structures::paid_by_type(&completed, category);

        if submit_payment_model.amount_minor != remaining {
            let err = PaymentError::AmountMismatch {
                required_minor: remaining,
                submitted_minor: submit_payment_model.amount_minor,
            };
            warn!(
                %user_id,
                payment_type = %category,
                required_minor = remaining,
                submitted_minor = submit_payment_model.amount_minor,
                status = err.status_code().as_u16(),
                "payments: amount does not settle the category"
            );
            return Err(err);
        }

        let total_paid = fee_structures::total_paid(&completed);
        if total_paid + submit_payment_model.amount_minor > structure.total_fee_minor {
            let err = PaymentError::ExceedsTotalFee;
            warn!(
                %user_id,
                total_paid_minor = total_paid,
                total_fee_minor = structure.total_fee_minor,
                status = err.status_code().as_u16(),
                "payments: submission would exceed total fee"
            );
            return Err(err);
        }

        let reference = Self::payment_reference();

        // Status is forced to completed once validation passes; any
        // caller-supplied status is superseded.
        let insert_transaction_entity = InsertTransactionEntity {
            user_id,
            amount_minor: submit_payment_model.amount_minor,
            payment_type: category.to_string(),
            payment_method: submit_payment_model.payment_method.to_string(),
            status: TransactionStatus::Completed.to_string(),
            reference: reference.clone(),
            created_at: Utc::now(),
        };

        let transaction = self
            .transaction_repo
            .record_completed(insert_transaction_entity, None)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    payment_type = %category,
                    db_error = ?err,
                    "payments: failed to record completed transaction"
                );
                PaymentError::Internal(err)
            })?;

        if let Err(err) = self
            .notifier
            .publish(PAYMENT_EVENTS_GROUP, "New transaction made successfully!")
            .await
        {
            warn!(
                %user_id,
                transaction_id = transaction.id,
                error = ?err,
                "payments: notification dispatch failed"
            );
        }

        let balance = structure.total_fee_minor - (total_paid + transaction.amount_minor);
        info!(
            %user_id,
            transaction_id = transaction.id,
            reference = %reference,
            balance_minor = balance,
            "payments: payment completed"
        );

        Ok(PaymentReceiptDto {
            message: "Payment processed".to_string(),
            reference,
            transaction_id: transaction.id,
            amount_minor: transaction.amount_minor,
            payment_type: category,
            status: TransactionStatus::from_str(&transaction.status).unwrap_or_default(),
            balance_minor: balance,
        })
    }

    pub async fn pending_payments(&self, user_id: Uuid) -> PaymentResult<Vec<CategoryBreakdown>> {
        Ok(self.fee_stats(user_id).await?.pending_by_category())
    }

    pub async fn fee_stats(&self, user_id: Uuid) -> PaymentResult<FeeBreakdown> {
        let structure = self
            .fee_structure_repo
            .latest_for_user(user_id)
            .await
            .map_err(PaymentError::Internal)?
            .ok_or(PaymentError::NoFeeStructure)?;

        let completed = self
            .transaction_repo
            .list_completed_by_user(user_id)
            .await
            .map_err(PaymentError::Internal)?;

        Ok(FeeBreakdown::compute(&structure, &completed))
    }

    pub async fn completed_transactions(
        &self,
        user_id: Uuid,
    ) -> PaymentResult<Vec<TransactionModel>> {
        let transactions = self
            .transaction_repo
            .list_completed_by_user(user_id)
            .await
            .map_err(PaymentError::Internal)?;

        Ok(transactions.into_iter().map(TransactionModel::from).collect())
    }

    pub async fn payment_history(&self, user_id: Uuid) -> PaymentResult<Vec<PaymentHistoryModel>> {
        let histories = self
            .transaction_repo
            .list_histories_by_user(user_id)
            .await
            .map_err(PaymentError::Internal)?;

        Ok(histories.into_iter().map(PaymentHistoryModel::from).collect())
    }

    pub async fn collection_stats(&self) -> PaymentResult<CollectionStatsDto> {
        let completed = self
            .transaction_repo
            .list_all_completed()
            .await
            .map_err(PaymentError::Internal)?;

        Ok(CollectionStatsDto {
            total_collected_minor: completed.iter().map(|t| t.amount_minor).sum(),
            completed_count: completed.len() as i64,
        })
    }

    fn payment_reference() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("MP{}", hex[..10].to_uppercase())
    }
}
