// handlers/mod.rs - one route table per role
//
// Every authenticated handler runs the same pipeline: verify the role's token
// against the id in the body, load the acting account under its eligibility
// predicate, validate the rest of the input, touch the store, then answer
// with the success envelope.

pub mod account;
pub mod admin;
pub mod club;
pub mod player;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::state::AppState;

/// Attaches the operation's summary message to a 422 while keeping its reason.
pub(crate) trait Context<T> {
    fn context(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T, E: Into<ApiError>> Context<T> for Result<T, E> {
    fn context(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| e.into().with_message(message))
    }
}

/// A target identifier the operation cannot run without (401 when absent).
pub(crate) fn required_id(value: Option<i64>, label: &str) -> Result<i64, ApiError> {
    value.ok_or_else(|| ApiError::unauthorized(format!("{} ID is missing", label)))
}

/// GET /health - database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Service healthy",
                "data": { "database": "ok", "timestamp": now }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "message": "Service degraded",
                    "data": { "database": "unavailable", "timestamp": now }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::StoreError;

    #[test]
    fn missing_target_ids_are_401() {
        let err = required_id(None, "Match").unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "Match ID is missing");
        assert_eq!(required_id(Some(9), "Match").unwrap(), 9);
    }

    #[test]
    fn context_only_rewrites_domain_failures() {
        let rejected: Result<(), StoreError> = Err(StoreError::Rejected("Wrong password"));
        let err = rejected.context("Login failed").unwrap_err();
        assert_eq!(err.message(), "Login failed");
        assert_eq!(err.to_json()["error"], "Wrong password");

        let duplicate: Result<(), StoreError> = Err(StoreError::DuplicateEmail);
        let err = duplicate.context("Registration failed").unwrap_err();
        assert_eq!(err.message(), "Validation error during registration");
    }
}
