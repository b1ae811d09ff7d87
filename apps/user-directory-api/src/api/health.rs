//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use domain_users::{InMemoryUserRepository, UserResult, UserService};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub total_users: usize,
}

pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state.users.clone())
}

/// Liveness check with the current number of users
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(users): State<UserService<InMemoryUserRepository>>,
) -> UserResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        total_users: users.count_users().await?,
    }))
}
