use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            profiles::{
                AdminProfileEntity, EditProfileEntity, InsertProfileEntity, ProfileEntity,
                StudentProfileEntity,
            },
            users::{EditUserEntity, RegisterUserEntity, UserEntity},
        },
        repositories::accounts::AccountRepository,
        value_objects::enums::{profile_statuses::ProfileStatus, roles::UserRole},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{admin_profiles, student_profiles, users},
    },
};

pub struct AccountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AccountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AccountRepository for AccountPostgres {
    async fn register(
        &self,
        register_user_entity: RegisterUserEntity,
        insert_profile_entity: Option<InsertProfileEntity>,
    ) -> Result<UserEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = conn.transaction::<UserEntity, diesel::result::Error, _>(|conn| {
            let user = insert_into(users::table)
                .values(&register_user_entity)
                .returning(UserEntity::as_returning())
                .get_result::<UserEntity>(conn)?;

            // The caller builds the profile before the user row exists, so
            // the user id is wired up here.
            match insert_profile_entity {
                Some(InsertProfileEntity::Student(mut profile)) => {
                    profile.user_id = user.id;
                    insert_into(student_profiles::table)
                        .values(&profile)
                        .execute(conn)?;
                }
                Some(InsertProfileEntity::Admin(mut profile)) => {
                    profile.user_id = user.id;
                    insert_into(admin_profiles::table)
                        .values(&profile)
                        .execute(conn)?;
                }
                None => {}
            }

            Ok(user)
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::id.eq(user_id))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .filter(users::student_id.eq(student_id))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update(
        &self,
        user_id: Uuid,
        edit_user_entity: EditUserEntity,
        edit_profile_entity: Option<EditProfileEntity>,
    ) -> Result<UserEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = conn.transaction::<UserEntity, diesel::result::Error, _>(|conn| {
            let user = update(users::table)
                .filter(users::id.eq(user_id))
                .set(&edit_user_entity)
                .returning(UserEntity::as_returning())
                .get_result::<UserEntity>(conn)?;

            match edit_profile_entity {
                Some(EditProfileEntity::Student(profile)) => {
                    update(student_profiles::table)
                        .filter(student_profiles::user_id.eq(user_id))
                        .set(&profile)
                        .execute(conn)?;
                }
                Some(EditProfileEntity::Admin(profile)) => {
                    update(admin_profiles::table)
                        .filter(admin_profiles::user_id.eq(user_id))
                        .set(&profile)
                        .execute(conn)?;
                }
                None => {}
            }

            Ok(user)
        })?;

        Ok(user)
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<ProfileEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let role = users::table
            .filter(users::id.eq(user_id))
            .select(users::role)
            .first::<String>(&mut conn)
            .optional()?;

        let profile = match role.as_deref() {
            Some("student") => student_profiles::table
                .filter(student_profiles::user_id.eq(user_id))
                .select(StudentProfileEntity::as_select())
                .first::<StudentProfileEntity>(&mut conn)
                .optional()?
                .map(ProfileEntity::Student),
            Some("admin") => admin_profiles::table
                .filter(admin_profiles::user_id.eq(user_id))
                .select(AdminProfileEntity::as_select())
                .first::<AdminProfileEntity>(&mut conn)
                .optional()?
                .map(ProfileEntity::Admin),
            _ => None,
        };

        Ok(profile)
    }

    async fn list_by_role(&self, role: &str) -> Result<Vec<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = users::table
            .filter(users::role.eq(role))
            .order(users::created_at.desc())
            .select(UserEntity::as_select())
            .load::<UserEntity>(&mut conn)?;

        Ok(results)
    }

    async fn count_by_role(&self, role: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = users::table
            .filter(users::role.eq(role))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn count_active_students(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = users::table
            .filter(users::role.eq(UserRole::Student.to_string()))
            .filter(users::status.eq(ProfileStatus::Active.to_string()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
