use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::users;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct RegisterUserEntity {
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct EditUserEntity {
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}
