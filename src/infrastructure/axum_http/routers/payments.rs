use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::info;

use crate::{
    application::usecases::payments::{NotificationPublisher, PaymentError, PaymentUseCase},
    domain::{
        repositories::{
            fee_structures::FeeStructureRepository, transactions::TransactionRepository,
        },
        value_objects::transactions::SubmitPaymentModel,
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::error_response},
        notification::hub::NotificationHub,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                fee_structures::FeeStructurePostgres, transactions::TransactionPostgres,
            },
        },
    },
};

fn build_usecase(
    db_pool: Arc<PgPoolSquad>,
    notification_hub: Arc<NotificationHub>,
) -> Arc<PaymentUseCase<TransactionPostgres, FeeStructurePostgres, NotificationHub>> {
    let transaction_repository = TransactionPostgres::new(Arc::clone(&db_pool));
    let fee_structure_repository = FeeStructurePostgres::new(Arc::clone(&db_pool));

    Arc::new(PaymentUseCase::new(
        Arc::new(transaction_repository),
        Arc::new(fee_structure_repository),
        notification_hub,
    ))
}

pub fn routes(db_pool: Arc<PgPoolSquad>, notification_hub: Arc<NotificationHub>) -> Router {
    Router::new()
        .route("/", post(submit_payment))
        .route("/pending", get(pending_payments))
        .route("/history", get(payment_history))
        .with_state(build_usecase(db_pool, notification_hub))
}

/// Read side of the ledger, nested separately under /transactions.
pub fn transaction_routes(
    db_pool: Arc<PgPoolSquad>,
    notification_hub: Arc<NotificationHub>,
) -> Router {
    Router::new()
        .route("/completed", get(completed_transactions))
        .with_state(build_usecase(db_pool, notification_hub))
}

pub fn payment_error_response(err: PaymentError) -> Response {
    let message = match &err {
        PaymentError::Internal(_) => "Internal server error".to_string(),
        other => other.to_string(),
    };

    error_response(err.status_code(), message)
}

pub async fn submit_payment<T, F, N>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, F, N>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(submit_payment_model): Json<SubmitPaymentModel>,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    info!(
        %user_id,
        payment_type = %submit_payment_model.payment_type,
        "payments: submission request received"
    );
    match payment_usecase
        .submit_payment(user_id, submit_payment_model)
        .await
    {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(err) => payment_error_response(err),
    }
}

pub async fn pending_payments<T, F, N>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, F, N>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    match payment_usecase.pending_payments(user_id).await {
        Ok(pending) => Json(pending).into_response(),
        Err(err) => payment_error_response(err),
    }
}

pub async fn payment_history<T, F, N>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, F, N>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    match payment_usecase.payment_history(user_id).await {
        Ok(histories) => Json(histories).into_response(),
        Err(err) => payment_error_response(err),
    }
}

pub async fn completed_transactions<T, F, N>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, F, N>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    match payment_usecase.completed_transactions(user_id).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(err) => payment_error_response(err),
    }
}
