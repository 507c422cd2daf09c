use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::{admin_profiles, student_profiles};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = student_profiles)]
pub struct StudentProfileEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub program: String,
    pub level: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = student_profiles)]
pub struct InsertStudentProfileEntity {
    pub user_id: Uuid,
    pub program: String,
    pub level: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = student_profiles)]
pub struct EditStudentProfileEntity {
    pub program: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = admin_profiles)]
pub struct AdminProfileEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub department: String,
    pub role_description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admin_profiles)]
pub struct InsertAdminProfileEntity {
    pub user_id: Uuid,
    pub department: String,
    pub role_description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = admin_profiles)]
pub struct EditAdminProfileEntity {
    pub department: Option<String>,
    pub role_description: Option<String>,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Role-specific profile attached to a user, selected by the user's role.
#[derive(Debug, Clone)]
pub enum ProfileEntity {
    Student(StudentProfileEntity),
    Admin(AdminProfileEntity),
}

#[derive(Debug, Clone)]
pub enum InsertProfileEntity {
    Student(InsertStudentProfileEntity),
    Admin(InsertAdminProfileEntity),
}

#[derive(Debug, Clone)]
pub enum EditProfileEntity {
    Student(EditStudentProfileEntity),
    Admin(EditAdminProfileEntity),
}
