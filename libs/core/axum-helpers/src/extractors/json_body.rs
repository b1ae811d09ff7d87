//! JSON body extractor that tolerates a missing body.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON extractor that yields `None` for an empty body or a literal `null`.
///
/// Unlike `axum::Json`, the `Content-Type` header is not checked, and every
/// decoding failure is reported as `400 Bad request` so handlers can decide
/// for themselves what a missing payload means.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<CreateUser>) -> String {
///     match payload {
///         Some(p) => format!("creating {}", p.name),
///         None => "no data".to_string(),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub Option<T>);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            AppError::BadRequest
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(None));
        }

        serde_json::from_slice::<Option<T>>(&bytes)
            .map(JsonBody)
            .map_err(|e| {
                tracing::info!(error = %e, "Rejected malformed JSON body");
                AppError::BadRequest
            })
    }
}
