pub mod axum_http;
pub mod mailer;
pub mod notification;
pub mod postgres;
pub mod reset_tokens;
