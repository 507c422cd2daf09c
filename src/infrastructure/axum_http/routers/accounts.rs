use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    application::usecases::accounts::{AccountError, AccountUseCase},
    domain::{
        repositories::accounts::AccountRepository,
        value_objects::{accounts::EditUserModel, enums::roles::UserRole},
    },
    infrastructure::{
        axum_http::{
            auth::{AdminUser, AuthUser},
            error_responses::error_response,
        },
        postgres::{postgres_connection::PgPoolSquad, repositories::accounts::AccountPostgres},
    },
};

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub role: UserRole,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let account_usecase = AccountUseCase::new(Arc::new(account_repository));

    Router::new()
        .route("/", get(list_accounts))
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/stats", get(account_stats))
        .with_state(Arc::new(account_usecase))
}

fn account_error_response(err: AccountError) -> Response {
    let message = match &err {
        AccountError::Internal(_) => "Internal server error".to_string(),
        other => other.to_string(),
    };

    error_response(err.status_code(), message)
}

pub async fn get_profile<A>(
    State(account_usecase): State<Arc<AccountUseCase<A>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    match account_usecase.get_profile(user_id).await {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => account_error_response(err),
    }
}

pub async fn update_profile<A>(
    State(account_usecase): State<Arc<AccountUseCase<A>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(edit_user_model): Json<EditUserModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!(%user_id, "accounts: profile update request received");
    match account_usecase.update_profile(user_id, edit_user_model).await {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => account_error_response(err),
    }
}

pub async fn list_accounts<A>(
    State(account_usecase): State<Arc<AccountUseCase<A>>>,
    AdminUser(admin): AdminUser,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, role = %query.role, "accounts: listing request received");
    match account_usecase.list_by_role(query.role).await {
        Ok(users) => Json(users).into_response(),
        Err(err) => account_error_response(err),
    }
}

pub async fn account_stats<A>(
    State(account_usecase): State<Arc<AccountUseCase<A>>>,
    AdminUser(admin): AdminUser,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
{
    info!(admin_id = %admin.user_id, "accounts: stats request received");
    match account_usecase.stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => account_error_response(err),
    }
}
