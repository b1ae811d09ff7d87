use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("User not found")]
    NotFound(u64),

    #[error("Email already exists")]
    DuplicateEmail(String),

    #[error("{0}")]
    Validation(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::DuplicateEmail(_) | UserError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match &self {
            UserError::NotFound(id) => tracing::info!(user_id = id, "User not found"),
            UserError::DuplicateEmail(email) => {
                tracing::info!(email = %email, "Rejected duplicate email")
            }
            UserError::Validation(msg) => tracing::info!("Validation failed: {}", msg),
        }

        ErrorResponse::new(self.to_string()).into_response_with(self.status())
    }
}
