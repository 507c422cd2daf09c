use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

pub fn error_response(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message,
        field: None,
    });

    (status, body).into_response()
}

/// Validation failures carry the offending field so clients can attach the
/// message to the right form input.
pub fn field_error_response(
    status: StatusCode,
    message: String,
    field: Option<&'static str>,
) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message,
        field,
    });

    (status, body).into_response()
}
