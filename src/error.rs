// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::StoreError;
use crate::services::media::MediaError;
use crate::validation::FieldErrors;

/// Message used for every 400 produced by field validation.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// HTTP API error carrying the status code and the failure envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: FieldErrors,
    },

    // 401 Unauthorized (a required identifier is absent)
    Unauthorized(String),

    // 403 Forbidden (token missing, invalid, expired or not the caller's)
    Forbidden(String),

    // 422 Unprocessable Entity (well-formed request the domain refuses)
    UnprocessableEntity {
        message: String,
        error: String,
    },
    DuplicateField {
        message: String,
        field_errors: FieldErrors,
    },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::UnprocessableEntity { .. } => 422,
            ApiError::DuplicateField { .. } => 422,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::DuplicateField { message, .. } => message,
            ApiError::InternalServerError(_) => "Internal server error",
        }
    }

    /// `failed` for anything the client can correct, `error` for server faults.
    pub fn status_label(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "error",
            _ => "failed",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "status": self.status_label(),
            "message": self.message(),
        });

        match self {
            ApiError::ValidationError { field_errors, .. } => {
                body["results"] = json!(field_errors);
            }
            ApiError::DuplicateField { field_errors, .. } => {
                body["errors"] = json!(field_errors);
            }
            ApiError::UnprocessableEntity { error, .. } => {
                body["error"] = json!(error);
            }
            ApiError::InternalServerError(error) => {
                body["error"] = json!(error);
            }
            _ => {}
        }

        body
    }

    /// Replace the summary message of a 422, keeping the canonical reason.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            ApiError::UnprocessableEntity { error, .. } => ApiError::UnprocessableEntity {
                message: message.into(),
                error,
            },
            other => other,
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(field_errors: FieldErrors) -> Self {
        ApiError::ValidationError {
            message: VALIDATION_FAILED.to_string(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn unprocessable(message: impl Into<String>, error: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            error: error.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::IdentifierMissing(_) => {
                tracing::warn!("Rejected request: {}", err);
                ApiError::unauthorized(err.to_string())
            }
            AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::IdentityMismatch => {
                tracing::warn!("Rejected request: {}", err);
                ApiError::forbidden(err.to_string())
            }
            AuthError::Signing(msg) => {
                tracing::error!("Token signing failed: {}", msg);
                ApiError::internal_server_error("Token could not be issued")
            }
            AuthError::Hashing(msg) => {
                tracing::error!("Password hashing failed: {}", msg);
                ApiError::internal_server_error("Password could not be processed")
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(reason) => {
                tracing::warn!("Domain rule rejected request: {}", reason);
                ApiError::unprocessable("Request could not be completed", reason)
            }
            StoreError::DuplicateEmail => {
                let mut field_errors = FieldErrors::new();
                field_errors.insert("Email".to_string(), vec!["Email already exists".to_string()]);
                ApiError::DuplicateField {
                    message: "Validation error during registration".to_string(),
                    field_errors,
                }
            }
            StoreError::Password(msg) => {
                tracing::error!("Password hashing failed: {}", msg);
                ApiError::internal_server_error("Password could not be processed")
            }
            StoreError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        tracing::error!("Media upload failed: {}", err);
        ApiError::internal_server_error("Image upload failed")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    #[test]
    fn validation_errors_list_fields_under_results() {
        let mut fields = FieldErrors::new();
        fields.insert("adminName".into(), vec!["Name is required".into()]);
        let err = ApiError::validation_error(fields);

        let body = err.to_json();
        assert_eq!(err.status_code(), 400);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["results"]["adminName"][0], "Name is required");
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        let missing = ApiError::from(AuthError::IdentifierMissing(Role::Club));
        assert_eq!(missing.status_code(), 401);
        assert_eq!(missing.message(), "Club ID is missing");

        let expired = ApiError::from(AuthError::TokenExpired);
        assert_eq!(expired.status_code(), 403);
        assert_eq!(expired.message(), "Token has expired");
    }

    #[test]
    fn duplicate_email_is_field_scoped_422() {
        let err = ApiError::from(StoreError::DuplicateEmail);
        let body = err.to_json();
        assert_eq!(err.status_code(), 422);
        assert_eq!(body["errors"]["Email"][0], "Email already exists");
    }

    #[test]
    fn domain_rejection_keeps_reason_when_message_changes() {
        let err = ApiError::from(StoreError::Rejected("Wrong password")).with_message("Login failed");
        let body = err.to_json();
        assert_eq!(err.status_code(), 422);
        assert_eq!(body["message"], "Login failed");
        assert_eq!(body["error"], "Wrong password");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::internal_server_error("Database error occurred");
        let body = err.to_json();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Internal server error");
    }
}
