use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::LedgerError;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method {method} not allowed")]
    MethodNotAllowed {
        method: String,
        allow: &'static str,
    },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(msg) => AppError::BadRequest(msg),
            LedgerError::StorageRead(msg) => AppError::ServiceUnavailable(msg),
            LedgerError::StorageWrite(msg) => AppError::StorageWrite(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut allow_header = None;
        let (status, error_message, code) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::MethodNotAllowed { method, allow } => {
                allow_header = Some(allow);
                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    format!("Method {} Not Allowed", method),
                    "METHOD_NOT_ALLOWED",
                )
            }
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                msg,
                "SERVICE_UNAVAILABLE",
            ),
            AppError::StorageWrite(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save matches: {}", msg),
                "STORAGE_WRITE_FAILED",
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "code": code
        }));

        let mut response = (status, body).into_response();
        if let Some(allow) = allow_header {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}
