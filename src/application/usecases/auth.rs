use std::{sync::Arc, time::Duration};

use anyhow::{Result as AnyResult, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    config::config_model::JwtSecrets,
    domain::{
        entities::users::EditUserEntity,
        repositories::{accounts::AccountRepository, reset_tokens::ResetTokenStore},
        value_objects::{
            accounts::{LoginModel, RegisterUserModel, UserModel},
            enums::{profile_statuses::ProfileStatus, roles::UserRole},
        },
    },
    infrastructure::axum_http::auth::{TOKEN_USE_REFRESH, TokenPair, issue_token_pair, validate_token},
};

/// Outbound email seam. The core issues a send request and never observes
/// delivery outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailerPort: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> AnyResult<()>;
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Student ID is required for student accounts.")]
    StudentIdRequired,
    #[error("Email is required for admin accounts.")]
    EmailRequired,
    #[error("Password is required.")]
    PasswordRequired,
    #[error("An account with this email already exists.")]
    EmailTaken,
    #[error("An account with this student ID already exists.")]
    StudentIdTaken,
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("User account is disabled.")]
    AccountDisabled,
    #[error("Invalid or expired reset token.")]
    InvalidResetToken,
    #[error("Account not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AuthError::StudentIdRequired
            | AuthError::EmailRequired
            | AuthError::PasswordRequired
            | AuthError::EmailTaken
            | AuthError::StudentIdTaken
            | AuthError::InvalidResetToken => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::AccountDisabled => StatusCode::UNAUTHORIZED,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Offending field for field-level validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AuthError::StudentIdRequired | AuthError::StudentIdTaken => Some("student_id"),
            AuthError::EmailRequired | AuthError::EmailTaken => Some("email"),
            AuthError::PasswordRequired => Some("password"),
            _ => None,
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponseDto {
    pub message: String,
    pub tokens: TokenPair,
    pub user: UserModel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordModel {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

pub struct AuthUseCase<A, R, M>
where
    A: AccountRepository + Send + Sync + 'static,
    R: ResetTokenStore + Send + Sync + 'static,
    M: MailerPort + 'static,
{
    account_repo: Arc<A>,
    reset_token_store: Arc<R>,
    mailer: Arc<M>,
    jwt_secrets: JwtSecrets,
    reset_token_ttl: Duration,
}

impl<A, R, M> AuthUseCase<A, R, M>
where
    A: AccountRepository + Send + Sync + 'static,
    R: ResetTokenStore + Send + Sync + 'static,
    M: MailerPort + 'static,
{
    pub fn new(
        account_repo: Arc<A>,
        reset_token_store: Arc<R>,
        mailer: Arc<M>,
        jwt_secrets: JwtSecrets,
        reset_token_ttl: Duration,
    ) -> Self {
        Self {
            account_repo,
            reset_token_store,
            mailer,
            jwt_secrets,
            reset_token_ttl,
        }
    }

    pub async fn register(&self, register_user_model: RegisterUserModel) -> AuthResult<UserModel> {
        Self::validate_registration(&register_user_model)?;

        if let Some(email) = register_user_model.email.as_deref() {
            if self
                .account_repo
                .find_by_email(email)
                .await
                .map_err(AuthError::Internal)?
                .is_some()
            {
                return Err(AuthError::EmailTaken);
            }
        }

        if let Some(student_id) = register_user_model.student_id.as_deref() {
            if self
                .account_repo
                .find_by_student_id(student_id)
                .await
                .map_err(AuthError::Internal)?
                .is_some()
            {
                return Err(AuthError::StudentIdTaken);
            }
        }

        let password_hash = hash_password(&register_user_model.password)?;
        let register_user_entity = register_user_model.to_entity(password_hash);

        // The profile rows carry the user id, which is generated by the
        // store; the repository wires it up inside the insert transaction.
        let placeholder_profile = register_user_model.to_profile_entity(Uuid::nil());

        let user = self
            .account_repo
            .register(register_user_entity, placeholder_profile)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to register user");
                AuthError::Internal(err)
            })?;

        info!(user_id = %user.id, role = %user.role, "auth: user registered");

        if let Some(email) = user.email.as_deref() {
            if let Err(err) = self
                .mailer
                .send(
                    email,
                    "Welcome to the tuition payment portal",
                    &welcome_email_html(&user.full_name),
                )
                .await
            {
                warn!(user_id = %user.id, error = ?err, "auth: welcome email failed");
            }
        }

        Ok(user.into())
    }

    pub async fn login(&self, login_model: LoginModel) -> AuthResult<LoginResponseDto> {
        let user = match login_model.role {
            UserRole::Student => self
                .account_repo
                .find_by_student_id(&login_model.username)
                .await
                .map_err(AuthError::Internal)?,
            UserRole::Admin => self
                .account_repo
                .find_by_email(&login_model.username)
                .await
                .map_err(AuthError::Internal)?,
        }
        .filter(|user| user.role == login_model.role.to_string())
        .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&login_model.password, &user.password_hash) {
            warn!(user_id = %user.id, "auth: bad password");
            return Err(AuthError::InvalidCredentials);
        }

        if ProfileStatus::from_str(&user.status) != Some(ProfileStatus::Active) {
            warn!(user_id = %user.id, "auth: disabled account login attempt");
            return Err(AuthError::AccountDisabled);
        }

        let tokens = issue_token_pair(user.id, login_model.role, &self.jwt_secrets)
            .map_err(|_| AuthError::Internal(anyhow!("failed to issue tokens")))?;

        info!(user_id = %user.id, role = %login_model.role, "auth: login successful");

        Ok(LoginResponseDto {
            message: "Login successful.".to_string(),
            tokens,
            user: user.into(),
        })
    }

    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = validate_token(
            refresh_token,
            &self.jwt_secrets.refresh_secret,
            TOKEN_USE_REFRESH,
        )
        .map_err(|_| AuthError::InvalidCredentials)?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .account_repo
            .find_by_id(user_id)
            .await
            .map_err(AuthError::Internal)?
            .ok_or(AuthError::InvalidCredentials)?;

        if ProfileStatus::from_str(&user.status) != Some(ProfileStatus::Active) {
            return Err(AuthError::AccountDisabled);
        }

        let role = UserRole::from_str(&user.role).ok_or(AuthError::InvalidCredentials)?;
        issue_token_pair(user.id, role, &self.jwt_secrets)
            .map_err(|_| AuthError::Internal(anyhow!("failed to issue tokens")))
    }

    /// Deliberately success-shaped for unknown emails so account existence
    /// does not leak.
    pub async fn forgot_password(&self, email: &str) -> AuthResult<()> {
        let user = match self
            .account_repo
            .find_by_email(email)
            .await
            .map_err(AuthError::Internal)?
        {
            Some(user) => user,
            None => {
                info!("auth: password reset requested for unknown email");
                return Ok(());
            }
        };

        let token = generate_reset_token();
        self.reset_token_store
            .put(email, &token, self.reset_token_ttl)
            .await
            .map_err(AuthError::Internal)?;

        if let Err(err) = self
            .mailer
            .send(
                email,
                "Reset your password",
                &reset_email_html(&user.full_name, &token),
            )
            .await
        {
            warn!(user_id = %user.id, error = ?err, "auth: reset email failed");
        }

        Ok(())
    }

    pub async fn reset_password(&self, reset_password_model: ResetPasswordModel) -> AuthResult<()> {
        if reset_password_model.new_password.trim().is_empty() {
            return Err(AuthError::PasswordRequired);
        }

        let consumed = self
            .reset_token_store
            .take(&reset_password_model.email, &reset_password_model.token)
            .await
            .map_err(AuthError::Internal)?;
        if !consumed {
            return Err(AuthError::InvalidResetToken);
        }

        let user = self
            .account_repo
            .find_by_email(&reset_password_model.email)
            .await
            .map_err(AuthError::Internal)?
            .ok_or(AuthError::InvalidResetToken)?;

        let password_hash = hash_password(&reset_password_model.new_password)?;
        let edit = EditUserEntity {
            email: None,
            student_id: None,
            full_name: None,
            phone_number: None,
            password_hash: Some(password_hash),
            status: None,
            updated_at: chrono::Utc::now(),
        };

        self.account_repo
            .update(user.id, edit, None)
            .await
            .map_err(AuthError::Internal)?;

        info!(user_id = %user.id, "auth: password reset completed");
        Ok(())
    }

    fn validate_registration(model: &RegisterUserModel) -> AuthResult<()> {
        match model.role {
            UserRole::Student if model.student_id.is_none() => {
                return Err(AuthError::StudentIdRequired);
            }
            UserRole::Admin if model.email.is_none() => return Err(AuthError::EmailRequired),
            _ => {}
        }

        if model.password.trim().is_empty() {
            return Err(AuthError::PasswordRequired);
        }

        Ok(())
    }
}

pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(anyhow!("failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn welcome_email_html(full_name: &str) -> String {
    format!(
        "<html><body><p>Hello {},</p>\
         <p>Your account on the tuition payment portal has been created.</p>\
         <p>You can now sign in and review your fee structure.</p></body></html>",
        full_name
    )
}

fn reset_email_html(full_name: &str, token: &str) -> String {
    format!(
        "<html><body><p>Hello {},</p>\
         <p>We received a request to reset your password. Use the token below \
         within the next hour. It can only be used once.</p>\
         <p><strong>{}</strong></p>\
         <p>If you did not request a reset, you can ignore this email.</p></body></html>",
        full_name, token
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::users::UserEntity,
        repositories::{accounts::MockAccountRepository, reset_tokens::MockResetTokenStore},
    };
    use chrono::Utc;

    fn secrets() -> JwtSecrets {
        JwtSecrets {
            secret: "accesssecretforunittesting123".to_string(),
            refresh_secret: "refreshsecretforunittesting456".to_string(),
            access_ttl_seconds: 900,
            refresh_ttl_seconds: 604800,
        }
    }

    fn usecase(
        account_repo: MockAccountRepository,
        reset_token_store: MockResetTokenStore,
        mailer: MockMailerPort,
    ) -> AuthUseCase<MockAccountRepository, MockResetTokenStore, MockMailerPort> {
        AuthUseCase::new(
            Arc::new(account_repo),
            Arc::new(reset_token_store),
            Arc::new(mailer),
            secrets(),
            Duration::from_secs(3600),
        )
    }

    fn student_entity(password: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            email: Some("alice@example.com".to_string()),
            student_id: Some("ST1234".to_string()),
            full_name: "Alice Student".to_string(),
            phone_number: "0123456789".to_string(),
            password_hash: hash_password(password).unwrap(),
            role: "student".to_string(),
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn registration(role: UserRole) -> RegisterUserModel {
        RegisterUserModel {
            full_name: "Alice Student".to_string(),
            email: Some("alice@example.com".to_string()),
            student_id: Some("ST1234".to_string()),
            phone_number: "0123456789".to_string(),
            password: "StrongPass123".to_string(),
            role,
            program: Some("Computer Science".to_string()),
            level: Some("200".to_string()),
            department: None,
            role_description: None,
        }
    }

    #[tokio::test]
    async fn student_registration_requires_student_id() {
        let mut model = registration(UserRole::Student);
        model.student_id = None;

        let usecase = usecase(
            MockAccountRepository::new(),
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        let err = usecase.register(model).await.expect_err("must fail");

        assert!(matches!(err, AuthError::StudentIdRequired));
        assert_eq!(err.field(), Some("student_id"));
    }

    #[tokio::test]
    async fn admin_registration_requires_email() {
        let mut model = registration(UserRole::Admin);
        model.email = None;
        model.department = Some("Finance".to_string());

        let usecase = usecase(
            MockAccountRepository::new(),
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        let err = usecase.register(model).await.expect_err("must fail");

        assert!(matches!(err, AuthError::EmailRequired));
        assert_eq!(err.field(), Some("email"));
    }

    #[tokio::test]
    async fn registration_requires_password() {
        let mut model = registration(UserRole::Student);
        model.password = "".to_string();

        let usecase = usecase(
            MockAccountRepository::new(),
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        let err = usecase.register(model).await.expect_err("must fail");

        assert!(matches!(err, AuthError::PasswordRequired));
        assert_eq!(err.field(), Some("password"));
    }

    #[tokio::test]
    async fn registration_attaches_student_profile_and_sends_welcome() {
        let mut account_repo = MockAccountRepository::new();
        account_repo.expect_find_by_email().returning(|_| Ok(None));
        account_repo
            .expect_find_by_student_id()
            .returning(|_| Ok(None));
        account_repo
            .expect_register()
            .withf(|entity, profile| {
                entity.role == "student"
                    && matches!(
                        profile,
                        Some(crate::domain::entities::profiles::InsertProfileEntity::Student(_))
                    )
            })
            .times(1)
            .returning(|entity, _| {
                Ok(UserEntity {
                    id: Uuid::new_v4(),
                    email: entity.email,
                    student_id: entity.student_id,
                    full_name: entity.full_name,
                    phone_number: entity.phone_number,
                    password_hash: entity.password_hash,
                    role: entity.role,
                    status: entity.status,
                    created_at: entity.created_at,
                    updated_at: entity.updated_at,
                })
            });

        let mut mailer = MockMailerPort::new();
        mailer
            .expect_send()
            .withf(|to, _, _| to == "alice@example.com")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let usecase = usecase(account_repo, MockResetTokenStore::new(), mailer);
        let user = usecase
            .register(registration(UserRole::Student))
            .await
            .expect("registration should succeed");

        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.student_id.as_deref(), Some("ST1234"));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(student_entity("StrongPass123"))));

        let usecase = usecase(
            account_repo,
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        let err = usecase
            .register(registration(UserRole::Student))
            .await
            .expect_err("duplicate email must fail");

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_student_id()
            .returning(|_| Ok(Some(student_entity("StrongPass123"))));

        let usecase = usecase(
            account_repo,
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        let err = usecase
            .login(LoginModel {
                role: UserRole::Student,
                username: "ST1234".to_string(),
                password: "WrongPass".to_string(),
            })
            .await
            .expect_err("wrong password must fail");

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_issues_token_pair_for_valid_credentials() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_student_id()
            .returning(|_| Ok(Some(student_entity("StrongPass123"))));

        let usecase = usecase(
            account_repo,
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        let response = usecase
            .login(LoginModel {
                role: UserRole::Student,
                username: "ST1234".to_string(),
                password: "StrongPass123".to_string(),
            })
            .await
            .expect("login should succeed");

        assert!(!response.tokens.access.is_empty());
        assert!(!response.tokens.refresh.is_empty());
        assert_eq!(response.user.student_id.as_deref(), Some("ST1234"));
    }

    #[tokio::test]
    async fn disabled_account_cannot_login() {
        let mut account_repo = MockAccountRepository::new();
        account_repo.expect_find_by_student_id().returning(|_| {
            let mut entity = student_entity("StrongPass123");
            entity.status = "inactive".to_string();
            Ok(Some(entity))
        });

        let usecase = usecase(
            account_repo,
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        let err = usecase
            .login(LoginModel {
                role: UserRole::Student,
                username: "ST1234".to_string(),
                password: "StrongPass123".to_string(),
            })
            .await
            .expect_err("disabled account must fail");

        assert!(matches!(err, AuthError::AccountDisabled));
    }

    #[tokio::test]
    async fn forgot_password_is_success_shaped_for_unknown_email() {
        let mut account_repo = MockAccountRepository::new();
        account_repo.expect_find_by_email().returning(|_| Ok(None));
        // Neither the token store nor the mailer may be touched.

        let usecase = usecase(
            account_repo,
            MockResetTokenStore::new(),
            MockMailerPort::new(),
        );
        usecase
            .forgot_password("nobody@example.com")
            .await
            .expect("unknown email must not error");
    }

    #[tokio::test]
    async fn reset_password_consumes_token_and_updates_hash() {
        let entity = student_entity("OldPass123");
        let user_id = entity.id;

        let mut account_repo = MockAccountRepository::new();
        let entity_clone = entity.clone();
        account_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(entity_clone.clone())));
        account_repo
            .expect_update()
            .withf(move |id, edit, profile| {
                *id == user_id && edit.password_hash.is_some() && profile.is_none()
            })
            .times(1)
            .returning(move |_, _, _| Ok(entity.clone()));

        let mut reset_token_store = MockResetTokenStore::new();
        reset_token_store
            .expect_take()
            .withf(|email, token| email == "alice@example.com" && token == "tok123")
            .times(1)
            .returning(|_, _| Ok(true));

        let usecase = usecase(account_repo, reset_token_store, MockMailerPort::new());
        usecase
            .reset_password(ResetPasswordModel {
                email: "alice@example.com".to_string(),
                token: "tok123".to_string(),
                new_password: "NewPass456".to_string(),
            })
            .await
            .expect("reset should succeed");
    }

    #[tokio::test]
    async fn reset_password_rejects_bad_token() {
        let mut reset_token_store = MockResetTokenStore::new();
        reset_token_store.expect_take().returning(|_, _| Ok(false));

        let usecase = usecase(
            MockAccountRepository::new(),
            reset_token_store,
            MockMailerPort::new(),
        );
        let err = usecase
            .reset_password(ResetPasswordModel {
                email: "alice@example.com".to_string(),
                token: "expired".to_string(),
                new_password: "NewPass456".to_string(),
            })
            .await
            .expect_err("bad token must fail");

        assert!(matches!(err, AuthError::InvalidResetToken));
    }
}
