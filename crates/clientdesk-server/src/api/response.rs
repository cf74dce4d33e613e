//! API response types
//!
//! Every JSON body is wrapped: `{ "success": true, "data": ... }` on success,
//! `{ "success": false, "error": { "code", "message" } }` on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Standard error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Pair the body with its status code
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Shorthand for the four error shapes used across the feature routes
pub fn validation_error(message: impl Into<String>) -> Response {
    ErrorResponse::new("VALIDATION_ERROR", message).into_response_with(StatusCode::BAD_REQUEST)
}

pub fn not_found(message: impl Into<String>) -> Response {
    ErrorResponse::new("NOT_FOUND", message).into_response_with(StatusCode::NOT_FOUND)
}

pub fn unauthorized(message: impl Into<String>) -> Response {
    ErrorResponse::new("UNAUTHORIZED", message).into_response_with(StatusCode::UNAUTHORIZED)
}

pub fn internal_error() -> Response {
    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
