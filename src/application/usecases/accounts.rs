use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    repositories::accounts::AccountRepository,
    value_objects::{
        accounts::{AccountStatsDto, EditUserModel, UserModel, UserProfileDto},
        enums::roles::UserRole,
    },
};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Account not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AccountError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct AccountUseCase<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
}

impl<A> AccountUseCase<A>
where
    A: AccountRepository + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>) -> Self {
        Self { account_repo }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserProfileDto, AccountError> {
        let user = self
            .account_repo
            .find_by_id(user_id)
            .await
            .map_err(AccountError::Internal)?
            .ok_or(AccountError::NotFound)?;

        let profile = self
            .account_repo
            .find_profile(user_id)
            .await
            .map_err(AccountError::Internal)?;

        Ok(UserProfileDto::new(user.into(), profile))
    }

    /// Applies a partial update to the account and its role-specific profile.
    /// The role itself is immutable after registration.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        edit_user_model: EditUserModel,
    ) -> Result<UserProfileDto, AccountError> {
        let user = self
            .account_repo
            .find_by_id(user_id)
            .await
            .map_err(AccountError::Internal)?
            .ok_or(AccountError::NotFound)?;

        let role = UserRole::from_str(&user.role).unwrap_or(UserRole::Student);
        let edit_user_entity = edit_user_model.to_user_entity();
        let edit_profile_entity = edit_user_model.to_profile_entity(role);

        let updated = self
            .account_repo
            .update(user_id, edit_user_entity, edit_profile_entity)
            .await
            .map_err(|err| {
                error!(user_id = %user_id, db_error = ?err, "accounts: profile update failed");
                AccountError::Internal(err)
            })?;

        info!(user_id = %user_id, "accounts: profile updated");

        let profile = self
            .account_repo
            .find_profile(user_id)
            .await
            .map_err(AccountError::Internal)?;

        Ok(UserProfileDto::new(updated.into(), profile))
    }

    pub async fn list_by_role(&self, role: UserRole) -> Result<Vec<UserModel>, AccountError> {
        let users = self
            .account_repo
            .list_by_role(&role.to_string())
            .await
            .map_err(AccountError::Internal)?;

        Ok(users.into_iter().map(UserModel::from).collect())
    }

    pub async fn stats(&self) -> Result<AccountStatsDto, AccountError> {
        let total_students = self
            .account_repo
            .count_by_role(&UserRole::Student.to_string())
            .await
            .map_err(AccountError::Internal)?;
        let total_admins = self
            .account_repo
            .count_by_role(&UserRole::Admin.to_string())
            .await
            .map_err(AccountError::Internal)?;
        let active_students = self
            .account_repo
            .count_active_students()
            .await
            .map_err(AccountError::Internal)?;

        Ok(AccountStatsDto {
            total_students,
            total_admins,
            active_students,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{
            profiles::{ProfileEntity, StudentProfileEntity},
            users::UserEntity,
        },
        repositories::accounts::MockAccountRepository,
        value_objects::enums::profile_statuses::ProfileStatus,
    };
    use chrono::Utc;

    fn student_entity() -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            email: Some("alice@example.com".to_string()),
            student_id: Some("ST1234".to_string()),
            full_name: "Alice Student".to_string(),
            phone_number: "0123456789".to_string(),
            password_hash: "hash".to_string(),
            role: "student".to_string(),
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn student_profile(user_id: Uuid) -> ProfileEntity {
        ProfileEntity::Student(StudentProfileEntity {
            id: 1,
            user_id,
            program: "Computer Science".to_string(),
            level: "200".to_string(),
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn get_profile_joins_user_and_student_profile() {
        let entity = student_entity();
        let user_id = entity.id;

        let mut account_repo = MockAccountRepository::new();
        let entity_clone = entity.clone();
        account_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(entity_clone.clone())));
        account_repo
            .expect_find_profile()
            .returning(move |id| Ok(Some(student_profile(id))));

        let usecase = AccountUseCase::new(Arc::new(account_repo));
        let dto = usecase.get_profile(user_id).await.expect("must resolve");

        assert_eq!(dto.user.id, user_id);
        let profile = dto.student_profile.expect("student profile expected");
        assert_eq!(profile.program, "Computer Science");
        assert!(dto.admin_profile.is_none());
    }

    #[tokio::test]
    async fn get_profile_unknown_user_is_not_found() {
        let mut account_repo = MockAccountRepository::new();
        account_repo.expect_find_by_id().returning(|_| Ok(None));

        let usecase = AccountUseCase::new(Arc::new(account_repo));
        let err = usecase
            .get_profile(Uuid::new_v4())
            .await
            .expect_err("must fail");

        assert!(matches!(err, AccountError::NotFound));
    }

    #[tokio::test]
    async fn update_profile_routes_changes_to_student_profile() {
        let entity = student_entity();
        let user_id = entity.id;

        let mut account_repo = MockAccountRepository::new();
        let entity_clone = entity.clone();
        account_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(entity_clone.clone())));
        account_repo
            .expect_update()
            .withf(|_, edit_user, edit_profile| {
                edit_user.full_name.as_deref() == Some("Alice Updated")
                    && matches!(
                        edit_profile,
                        Some(crate::domain::entities::profiles::EditProfileEntity::Student(edit))
                            if edit.level.as_deref() == Some("300")
                    )
            })
            .times(1)
            .returning(move |_, _, _| {
                let mut updated = entity.clone();
                updated.full_name = "Alice Updated".to_string();
                Ok(updated)
            });
        account_repo
            .expect_find_profile()
            .returning(move |id| Ok(Some(student_profile(id))));

        let usecase = AccountUseCase::new(Arc::new(account_repo));
        let dto = usecase
            .update_profile(
                user_id,
                EditUserModel {
                    full_name: Some("Alice Updated".to_string()),
                    email: None,
                    phone_number: None,
                    program: None,
                    level: Some("300".to_string()),
                    department: None,
                    role_description: None,
                    status: None,
                },
            )
            .await
            .expect("update should succeed");

        assert_eq!(dto.user.full_name, "Alice Updated");
    }

    #[tokio::test]
    async fn stats_aggregates_role_counts() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_count_by_role()
            .withf(|role| role == "student")
            .returning(|_| Ok(42));
        account_repo
            .expect_count_by_role()
            .withf(|role| role == "admin")
            .returning(|_| Ok(3));
        account_repo.expect_count_active_students().returning(|| Ok(40));

        let usecase = AccountUseCase::new(Arc::new(account_repo));
        let stats = usecase.stats().await.expect("stats should resolve");

        assert_eq!(stats.total_students, 42);
        assert_eq!(stats.total_admins, 3);
        assert_eq!(stats.active_students, 40);
    }

    #[tokio::test]
    async fn list_by_role_maps_entities() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_list_by_role()
            .withf(|role| role == "student")
            .returning(|_| Ok(vec![student_entity(), student_entity()]));

        let usecase = AccountUseCase::new(Arc::new(account_repo));
        let users = usecase
            .list_by_role(UserRole::Student)
            .await
            .expect("listing should resolve");

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].status, ProfileStatus::Active);
    }
}
