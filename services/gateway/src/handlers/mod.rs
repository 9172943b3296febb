pub mod matches;
pub mod ratings;

use axum::{
    http::{HeaderName, HeaderValue, Method},
    response::{IntoResponse, Response},
    Json,
};
use persistence::Backend;
use serde::Serialize;

use crate::error::AppError;

/// Backend that served the request
pub const BACKEND_HEADER: HeaderName = HeaderName::from_static("x-ledger-backend");

/// Present when a store read failed and an empty ledger was served
pub const DEGRADED_HEADER: HeaderName = HeaderName::from_static("x-ledger-degraded");

/// JSON body tagged with the observability headers.
pub(crate) fn ledger_response<T: Serialize>(backend: Backend, degraded: bool, body: T) -> Response {
    let mut response = Json(body).into_response();
    let headers = response.headers_mut();
    headers.insert(BACKEND_HEADER, HeaderValue::from_static(backend.as_str()));
    if degraded {
        headers.insert(DEGRADED_HEADER, HeaderValue::from_static("read-failed"));
    }
    response
}

pub(crate) fn method_not_allowed(method: Method, allow: &'static str) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        allow,
    }
}
