use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tracing::info;

use crate::{
    application::usecases::{
        fee_structures::{FeeError, FeeStructureUseCase},
        payments::{NotificationPublisher, PaymentUseCase},
    },
    domain::{
        repositories::{
            accounts::AccountRepository, fee_catalog::FeeCatalogRepository,
            fee_structures::FeeStructureRepository, transactions::TransactionRepository,
        },
        value_objects::fee_structures::{AssignFeeStructureModel, UpsertFeeCatalogModel},
    },
    infrastructure::{
        axum_http::{
            auth::{AdminUser, AuthUser},
            error_responses::error_response,
        },
        notification::hub::NotificationHub,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                accounts::AccountPostgres, fee_catalog::FeeCatalogPostgres,
                fee_structures::FeeStructurePostgres, transactions::TransactionPostgres,
            },
        },
    },
};

use super::payments::payment_error_response;

pub fn routes(db_pool: Arc<PgPoolSquad>, notification_hub: Arc<NotificationHub>) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let fee_catalog_repository = FeeCatalogPostgres::new(Arc::clone(&db_pool));
    let fee_structure_repository = FeeStructurePostgres::new(Arc::clone(&db_pool));
    let fee_usecase = FeeStructureUseCase::new(
        Arc::new(account_repository),
        Arc::new(fee_catalog_repository),
        Arc::new(fee_structure_repository),
    );

    let transaction_repository = TransactionPostgres::new(Arc::clone(&db_pool));
    let fee_structure_repository = FeeStructurePostgres::new(Arc::clone(&db_pool));
    let payment_usecase = PaymentUseCase::new(
        Arc::new(transaction_repository),
        Arc::new(fee_structure_repository),
        notification_hub,
    );

    let fee_routes = Router::new()
        .route("/catalog", put(upsert_catalog_entry))
        .route("/catalog/:program/:level", get(get_catalog_entry))
        .route("/structures", post(assign_structure))
        .route("/structures/current", get(current_structure))
        .route("/structures/history", get(structure_history))
        .with_state(Arc::new(fee_usecase));

    let stats_routes = Router::new()
        .route("/stats", get(fee_stats))
        .with_state(Arc::new(payment_usecase));

    fee_routes.merge(stats_routes)
}

fn fee_error_response(err: FeeError) -> Response {
    let message = match &err {
        FeeError::Internal(_) => "Internal server error".to_string(),
        other => other.to_string(),
    };

    error_response(err.status_code(), message)
}

pub async fn upsert_catalog_entry<A, C, F>(
    State(fee_usecase): State<Arc<FeeStructureUseCase<A, C, F>>>,
    AdminUser(admin): AdminUser,
    Json(model): Json<UpsertFeeCatalogModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: FeeCatalogRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
{
    info!(
        admin_id = %admin.user_id,
        program = %model.program,
        level = %model.level,
        "fees: catalog upsert request received"
    );
    match fee_usecase.upsert_catalog_entry(model).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => fee_error_response(err),
    }
}

pub async fn get_catalog_entry<A, C, F>(
    State(fee_usecase): State<Arc<FeeStructureUseCase<A, C, F>>>,
    _auth: AuthUser,
    Path((program, level)): Path<(String, String)>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: FeeCatalogRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
{
    match fee_usecase.get_catalog_entry(&program, &level).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => fee_error_response(err),
    }
}

pub async fn assign_structure<A, C, F>(
    State(fee_usecase): State<Arc<FeeStructureUseCase<A, C, F>>>,
    AdminUser(admin): AdminUser,
    Json(model): Json<AssignFeeStructureModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: FeeCatalogRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
{
    info!(
        admin_id = %admin.user_id,
        student_id = %model.student_id,
        academic_year = %model.academic_year,
        "fees: structure assignment request received"
    );
    match fee_usecase.assign_structure(model).await {
        Ok(structure) => (axum::http::StatusCode::CREATED, Json(structure)).into_response(),
        Err(err) => fee_error_response(err),
    }
}

pub async fn current_structure<A, C, F>(
    State(fee_usecase): State<Arc<FeeStructureUseCase<A, C, F>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: FeeCatalogRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
{
    match fee_usecase.current_structure(user_id).await {
        Ok(structure) => Json(structure).into_response(),
        Err(err) => fee_error_response(err),
    }
}

pub async fn structure_history<A, C, F>(
    State(fee_usecase): State<Arc<FeeStructureUseCase<A, C, F>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    C: FeeCatalogRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
{
    match fee_usecase.structure_history(user_id).await {
        Ok(structures) => Json(structures).into_response(),
        Err(err) => fee_error_response(err),
    }
}

pub async fn fee_stats<T, F, N>(
    State(payment_usecase): State<Arc<PaymentUseCase<T, F, N>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    T: TransactionRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
    N: NotificationPublisher + 'static,
{
    match payment_usecase.fee_stats(user_id).await {
        Ok(breakdown) => Json(breakdown).into_response(),
        Err(err) => payment_error_response(err),
    }
}
