use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use tracing::info;

use crate::{
    application::usecases::payments::{NotificationPublisher, PaymentUseCase},
    domain::repositories::{
        fee_structures::FeeStructureRepository, transactions::TransactionRepository,
    },
    infrastructure::{
        axum_http::auth::AdminUser,
        notification::hub::NotificationHub,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                fee_structures::FeeStructurePostgres, transactions::TransactionPostgres,
            },
        },
    },
};

use super::payments::payment_error_response;

pub fn routes(db_pool: Arc<PgPoolSquad>, notification_hub: Arc<NotificationHub>) -> Router {
    let transaction_repository = TransactionPostgres::new(Arc::clone(&db_pool));
    let fee_structure_repository = FeeStructurePostgres::new(Arc::clone(&db_pool));
    let payment_usecase = PaymentUseCase::new(
        Arc::new(transaction_repository),
        Arc::new(fee_structure_repository),
        notification_hub,
    );

    Router::new()
        .route("/collections", get(collection_stats))
        .with_state(Arc::new(payment_usecase))
}

pub async fn collection_stats<T, F, N>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, F, N>>>,
    AdminUser(admin): AdminUser,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    info!(admin_id = %admin.user_id, "dashboard: collection stats request received");
    match payment_usecase.collection_stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => payment_error_response(err),
    }
}
