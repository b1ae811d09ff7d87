//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`crate::errors::AppError`] so clients always
//! receive the standard `{"error": ...}` body.

pub mod id_path;
pub mod json_body;

pub use id_path::IdPath;
pub use json_body::JsonBody;
