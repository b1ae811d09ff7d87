pub mod handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Fixed messages for framework-level failures.
pub mod messages {
    pub const BAD_REQUEST: &str = "Bad request";
    pub const NOT_FOUND: &str = "Resource not found";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    pub const INTERNAL_ERROR: &str = "Internal server error";
}

/// Error body returned by every failing endpoint.
///
/// ```json
/// { "error": "Resource not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Build a complete response with the given status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Errors raised by the HTTP plumbing itself, before a handler's domain logic
/// runs. Each variant renders a fixed message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    #[error("{}", messages::BAD_REQUEST)]
    BadRequest,

    #[error("{}", messages::NOT_FOUND)]
    NotFound,

    #[error("{}", messages::METHOD_NOT_ALLOWED)]
    MethodNotAllowed,

    #[error("{}", messages::INTERNAL_ERROR)]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ErrorResponse::new(self.to_string()).into_response_with(self.status())
    }
}
