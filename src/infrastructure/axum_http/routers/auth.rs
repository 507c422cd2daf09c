use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    application::usecases::auth::{AuthError, AuthUseCase, MailerPort, ResetPasswordModel},
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{accounts::AccountRepository, reset_tokens::ResetTokenStore},
        value_objects::accounts::{LoginModel, RegisterUserModel},
    },
    infrastructure::{
        axum_http::error_responses::field_error_response,
        mailer::SmtpMailer,
        postgres::{postgres_connection::PgPoolSquad, repositories::accounts::AccountPostgres},
        reset_tokens::InMemoryResetTokenStore,
    },
};

#[derive(Debug, Deserialize)]
pub struct RefreshModel {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordModel {
    pub email: String,
}

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    config: Arc<DotEnvyConfig>,
    mailer: Arc<SmtpMailer>,
) -> Router {
    let account_repository = AccountPostgres::new(Arc::clone(&db_pool));
    let reset_token_store = InMemoryResetTokenStore::new();
    let auth_usecase = AuthUseCase::new(
        Arc::new(account_repository),
        Arc::new(reset_token_store),
        mailer,
        config.jwt.clone(),
        Duration::from_secs(config.reset_token_ttl_seconds),
    );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .with_state(Arc::new(auth_usecase))
}

fn auth_error_response(err: AuthError) -> Response {
    let message = match &err {
        AuthError::Internal(_) => "Internal server error".to_string(),
        other => other.to_string(),
    };

    field_error_response(err.status_code(), message, err.field())
}

pub async fn register<A, R, M>(
    State(auth_usecase): State<Arc<AuthUseCase<A, R, M>>>,
    Json(register_user_model): Json<RegisterUserModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    R: ResetTokenStore + Send + Sync + 'static,
    M: MailerPort + 'static,
{
    info!(role = %register_user_model.role, "auth: registration request received");
    match auth_usecase.register(register_user_model).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => auth_error_response(err),
    }
}

pub async fn login<A, R, M>(
    State(auth_usecase): State<Arc<AuthUseCase<A, R, M>>>,
    Json(login_model): Json<LoginModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    R: ResetTokenStore + Send + Sync + 'static,
    M: MailerPort + 'static,
{
    info!(role = %login_model.role, "auth: login request received");
    match auth_usecase.login(login_model).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => auth_error_response(err),
    }
}

pub async fn refresh<A, R, M>(
    State(auth_usecase): State<Arc<AuthUseCase<A, R, M>>>,
    Json(refresh_model): Json<RefreshModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    R: ResetTokenStore + Send + Sync + 'static,
    M: MailerPort + 'static,
{
    match auth_usecase.refresh(&refresh_model.refresh_token).await {
        Ok(tokens) => Json(tokens).into_response(),
        Err(err) => auth_error_response(err),
    }
}

pub async fn forgot_password<A, R, M>(
    State(auth_usecase): State<Arc<AuthUseCase<A, R, M>>>,
    Json(forgot_password_model): Json<ForgotPasswordModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    R: ResetTokenStore + Send + Sync + 'static,
    M: MailerPort + 'static,
{
    match auth_usecase
        .forgot_password(&forgot_password_model.email)
        .await
    {
        // The same body regardless of whether the account exists.
        Ok(()) => Json(serde_json::json!({
            "message": "If an account exists for this email, a reset token has been sent."
        }))
        .into_response(),
        Err(err) => auth_error_response(err),
    }
}

pub async fn reset_password<A, R, M>(
    State(auth_usecase): State<Arc<AuthUseCase<A, R, M>>>,
    Json(reset_password_model): Json<ResetPasswordModel>,
) -> impl IntoResponse
where
    A: AccountRepository + Send + Sync + 'static,
    R: ResetTokenStore + Send + Sync + 'static,
    M: MailerPort + 'static,
{
    match auth_usecase.reset_password(reset_password_model).await {
        Ok(()) => Json(serde_json::json!({
            "message": "Password has been reset."
        }))
        .into_response(),
        Err(err) => auth_error_response(err),
    }
}
