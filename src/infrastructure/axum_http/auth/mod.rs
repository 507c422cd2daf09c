use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{config_loader, config_model::JwtSecrets},
    domain::value_objects::enums::roles::UserRole,
};

pub const TOKEN_USE_ACCESS: &str = "access";
pub const TOKEN_USE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub token_use: String,
    pub exp: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

#[derive(Debug)]
pub struct AuthError(anyhow::Error);

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError(err)
    }
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::UNAUTHORIZED,
            format!("Unauthorized: {}", self.0),
        )
            .into_response()
    }
}

pub fn issue_token_pair(
    user_id: Uuid,
    role: UserRole,
    secrets: &JwtSecrets,
) -> Result<TokenPair, AuthError> {
    let access = issue_token(
        user_id,
        role,
        TOKEN_USE_ACCESS,
        secrets.access_ttl_seconds,
        &secrets.secret,
    )?;
    let refresh = issue_token(
        user_id,
        role,
        TOKEN_USE_REFRESH,
        secrets.refresh_ttl_seconds,
        &secrets.refresh_secret,
    )?;

    Ok(TokenPair { access, refresh })
}

fn issue_token(
    user_id: Uuid,
    role: UserRole,
    token_use: &str,
    ttl_seconds: u64,
    secret: &str,
) -> Result<String, AuthError> {
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        token_use: token_use.to_string(),
        exp: (Utc::now().timestamp() as usize) + ttl_seconds as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))?;

    Ok(token)
}

pub fn validate_token(token: &str, secret: &str, expected_use: &str) -> Result<Claims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    if token_data.claims.token_use != expected_use {
        return Err(AuthError(anyhow::anyhow!(
            "Wrong token use: expected {}",
            expected_use
        )));
    }

    Ok(token_data.claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let auth_str = auth_header.to_str().map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header".to_string(),
            )
        })?;

        if !auth_str.starts_with("Bearer ") {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_str[7..];

        let secrets = config_loader::load_jwt_secrets()
            .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;
        let claims = validate_token(token, &secrets.secret, TOKEN_USE_ACCESS)
            .map_err(|e| (StatusCode::UNAUTHORIZED, e.0.to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid user ID in token".to_string(),
            )
        })?;

        let role = UserRole::from_str(&claims.role).ok_or((
            StatusCode::UNAUTHORIZED,
            "Invalid role in token".to_string(),
        ))?;

        Ok(AuthUser { user_id, role })
    }
}

/// Extractor for admin-only routes. Rejects non-admin bearers with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if auth_user.role != UserRole::Admin {
            return Err((
                StatusCode::FORBIDDEN,
                "Admin privileges required".to_string(),
            ));
        }

        Ok(AdminUser(auth_user))
    }
}

#[cfg(test)]
mod tests;
