//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, graceful shutdown
//! - **[`middleware`]**: CORS and security headers
//! - **[`errors`]**: The `{"error": ...}` response body and framework-level errors
//! - **[`extractors`]**: Integer id path and optional JSON body extractors

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod server;

pub use server::{ShutdownCoordinator, create_app, create_router, shutdown_signal};

pub use middleware::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorResponse};

pub use extractors::{IdPath, JsonBody};
