//! API routes module

pub mod health;
pub mod root;
pub mod users;

use axum::Router;
use axum_helpers::create_router;
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// All service routes, state applied
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .merge(health::router(state))
        .merge(root::router(state.config.app))
}

/// Routes plus documentation, fallbacks and middleware
pub fn app(state: &AppState) -> io::Result<Router> {
    create_router::<ApiDoc>(routes(state), &state.config.server)
}
