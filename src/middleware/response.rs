use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Success envelope: `{status: "success", message, data?}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub message: Cow<'static, str>,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A success envelope with no `data` member.
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = json!({
            "status": "success",
            "message": self.message,
        });

        if let Some(data) = self.data {
            match serde_json::to_value(&data) {
                Ok(value) => envelope["data"] = value,
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return crate::error::ApiError::internal_server_error("Failed to format response")
                        .into_response();
                }
            }
        }

        (StatusCode::OK, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
