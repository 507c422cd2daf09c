use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    profiles::{EditProfileEntity, InsertProfileEntity, ProfileEntity},
    users::{EditUserEntity, RegisterUserEntity, UserEntity},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository {
    /// Inserts the user and, when supplied, its role-specific profile in one
    /// database transaction.
    async fn register(
        &self,
        register_user_entity: RegisterUserEntity,
        insert_profile_entity: Option<InsertProfileEntity>,
    ) -> Result<UserEntity>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<UserEntity>>;

    async fn update(
        &self,
        user_id: Uuid,
        edit_user_entity: EditUserEntity,
        edit_profile_entity: Option<EditProfileEntity>,
    ) -> Result<UserEntity>;

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileEntity>>;
    async fn list_by_role(&self, role: &str) -> Result<Vec<UserEntity>>;
    async fn count_by_role(&self, role: &str) -> Result<i64>;
    async fn count_active_students(&self) -> Result<i64>;
}
