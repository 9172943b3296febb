use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::handlers::{ledger_response, method_not_allowed};
use crate::models::DeleteMatchRequest;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::Method,
    response::Response,
    Json,
};
use tracing::info;
use types::matches::MatchCandidate;

pub const ALLOWED_METHODS: &str = "GET, POST, DELETE";

pub async fn list_matches(State(state): State<AppState>) -> Response {
    let read = state.ledger.list_matches().await;
    ledger_response(state.ledger.backend(), read.degraded, read.matches)
}

pub async fn record_match(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<MatchCandidate>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(candidate) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    info!(subject = %user.subject, email = ?user.email, "record match requested");
    let matches = state.ledger.record_match(candidate).await?;

    Ok(ledger_response(state.ledger.backend(), false, matches))
}

pub async fn delete_match(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    query: Result<Query<DeleteMatchRequest>, QueryRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // Query string first, JSON body as the fallback
    let recorded_at = match params.recorded_at {
        Some(value) => Some(value),
        None => recorded_at_from_body(&body)?,
    };

    info!(
        subject = %user.subject,
        email = ?user.email,
        recorded_at = ?recorded_at,
        "delete match requested"
    );
    let matches = state.ledger.delete_match(recorded_at.as_deref()).await?;

    Ok(ledger_response(state.ledger.backend(), false, matches))
}

pub async fn unsupported(method: Method) -> AppError {
    method_not_allowed(method, ALLOWED_METHODS)
}

fn recorded_at_from_body(body: &[u8]) -> Result<Option<String>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<DeleteMatchRequest>(body)
        .map(|request| request.recorded_at)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_at_from_body() {
        assert_eq!(recorded_at_from_body(b"").unwrap(), None);
        assert_eq!(recorded_at_from_body(b"  \n").unwrap(), None);
        assert_eq!(recorded_at_from_body(b"{}").unwrap(), None);
        assert_eq!(
            recorded_at_from_body(br#"{"recordedAt":"2024-05-01T12:00:00.000Z"}"#).unwrap(),
            Some("2024-05-01T12:00:00.000Z".to_string())
        );
        assert!(recorded_at_from_body(b"{oops").is_err());
    }
}
