use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{
        profiles::{
            AdminProfileEntity, EditAdminProfileEntity, EditProfileEntity,
            EditStudentProfileEntity, InsertAdminProfileEntity, InsertProfileEntity,
            InsertStudentProfileEntity, ProfileEntity, StudentProfileEntity,
        },
        users::{EditUserEntity, RegisterUserEntity, UserEntity},
    },
    value_objects::enums::{profile_statuses::ProfileStatus, roles::UserRole},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserModel {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub role: UserRole,
    pub phone_number: String,
    pub status: ProfileStatus,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for UserModel {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            student_id: entity.student_id,
            role: UserRole::from_str(&entity.role).unwrap_or(UserRole::Student),
            phone_number: entity.phone_number,
            status: ProfileStatus::from_str(&entity.status).unwrap_or_default(),
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserModel {
    pub full_name: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub phone_number: String,
    pub password: String,
    pub role: UserRole,
    // Role-specific profile fields, picked up according to `role`.
    pub program: Option<String>,
    pub level: Option<String>,
    pub department: Option<String>,
    pub role_description: Option<String>,
}

impl RegisterUserModel {
    pub fn to_entity(&self, password_hash: String) -> RegisterUserEntity {
        RegisterUserEntity {
            email: self.email.clone(),
            student_id: self.student_id.clone(),
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
            password_hash,
            role: self.role.to_string(),
            status: ProfileStatus::Active.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Builds the profile variant matching the declared role, when the
    /// role-specific fields were supplied at registration.
    pub fn to_profile_entity(&self, user_id: Uuid) -> Option<InsertProfileEntity> {
        match self.role {
            UserRole::Student => match (&self.program, &self.level) {
                (Some(program), Some(level)) => {
                    Some(InsertProfileEntity::Student(InsertStudentProfileEntity {
                        user_id,
                        program: program.clone(),
                        level: level.clone(),
                        status: ProfileStatus::Active.to_string(),
                        created_at: Utc::now(),
                        updated_at: Utc::now(),
                    }))
                }
                _ => None,
            },
            UserRole::Admin => self.department.as_ref().map(|department| {
                InsertProfileEntity::Admin(InsertAdminProfileEntity {
                    user_id,
                    department: department.clone(),
                    role_description: self.role_description.clone(),
                    status: ProfileStatus::Active.to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginModel {
    pub role: UserRole,
    /// Student identifier for students, email for admins.
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditUserModel {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub program: Option<String>,
    pub level: Option<String>,
    pub department: Option<String>,
    pub role_description: Option<String>,
    pub status: Option<ProfileStatus>,
}

impl EditUserModel {
    pub fn to_user_entity(&self) -> EditUserEntity {
        EditUserEntity {
            email: self.email.clone(),
            student_id: None,
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
            password_hash: None,
            status: self.status.map(|status| status.to_string()),
            updated_at: Utc::now(),
        }
    }

    /// Partial changeset for the profile variant matching `role`. Switching a
    /// profile to the other variant is not supported by the update path.
    pub fn to_profile_entity(&self, role: UserRole) -> Option<EditProfileEntity> {
        match role {
            UserRole::Student => {
                if self.program.is_none() && self.level.is_none() && self.status.is_none() {
                    return None;
                }
                Some(EditProfileEntity::Student(EditStudentProfileEntity {
                    program: self.program.clone(),
                    level: self.level.clone(),
                    status: self.status.map(|status| status.to_string()),
                    updated_at: Utc::now(),
                }))
            }
            UserRole::Admin => {
                if self.department.is_none()
                    && self.role_description.is_none()
                    && self.status.is_none()
                {
                    return None;
                }
                Some(EditProfileEntity::Admin(EditAdminProfileEntity {
                    department: self.department.clone(),
                    role_description: self.role_description.clone(),
                    status: self.status.map(|status| status.to_string()),
                    updated_at: Utc::now(),
                }))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentProfileModel {
    pub program: String,
    pub level: String,
    pub status: ProfileStatus,
}

impl From<StudentProfileEntity> for StudentProfileModel {
    fn from(entity: StudentProfileEntity) -> Self {
        Self {
            program: entity.program,
            level: entity.level,
            status: ProfileStatus::from_str(&entity.status).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminProfileModel {
    pub department: String,
    pub role_description: Option<String>,
    pub status: ProfileStatus,
}

impl From<AdminProfileEntity> for AdminProfileModel {
    fn from(entity: AdminProfileEntity) -> Self {
        Self {
            department: entity.department,
            role_description: entity.role_description,
            status: ProfileStatus::from_str(&entity.status).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfileDto {
    #[serde(flatten)]
    pub user: UserModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_profile: Option<StudentProfileModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_profile: Option<AdminProfileModel>,
}

impl UserProfileDto {
    pub fn new(user: UserModel, profile: Option<ProfileEntity>) -> Self {
        let (student_profile, admin_profile) = match profile {
            Some(ProfileEntity::Student(profile)) => (Some(profile.into()), None),
            Some(ProfileEntity::Admin(profile)) => (None, Some(profile.into())),
            None => (None, None),
        };

        Self {
            user,
            student_profile,
            admin_profile,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountStatsDto {
    pub total_students: i64,
    pub total_admins: i64,
    pub active_students: i64,
}
