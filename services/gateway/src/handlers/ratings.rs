use crate::error::AppError;
use crate::handlers::{ledger_response, method_not_allowed};
use crate::state::AppState;
use axum::{extract::State, http::Method, response::Response};

pub const ALLOWED_METHODS: &str = "GET";

/// Standings recomputed from the full ledger, highest rating first.
pub async fn get_ratings(State(state): State<AppState>) -> Response {
    let ledger = state.ledger.current_state().await;
    ledger_response(state.ledger.backend(), ledger.degraded, ledger.standings())
}

pub async fn unsupported(method: Method) -> AppError {
    method_not_allowed(method, ALLOWED_METHODS)
}
