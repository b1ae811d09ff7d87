//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI documentation and common middleware
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &config.server)?;
//! create_app(router, &config.server, async {}).await?;
//! ```

pub mod app;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
