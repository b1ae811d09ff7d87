//! Root discovery endpoint

use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const API_TITLE: &str = "User Management API";

const ENDPOINTS: [(&str, &str); 7] = [
    ("GET /users", "Get all users"),
    ("GET /users/{id}", "Get specific user"),
    ("POST /users", "Create new user"),
    ("PUT /users/{id}", "Update entire user"),
    ("PATCH /users/{id}", "Partially update user"),
    ("DELETE /users/{id}", "Delete user"),
    ("GET /health", "Health check"),
];

#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

pub fn router(app: AppInfo) -> Router {
    Router::new().route("/", get(root)).with_state(app)
}

/// Describe the service and list its endpoints
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Endpoint directory", body = RootResponse)
    )
)]
pub async fn root(State(app): State<AppInfo>) -> Json<RootResponse> {
    Json(RootResponse {
        message: API_TITLE,
        version: app.version,
        endpoints: ENDPOINTS.into_iter().collect(),
    })
}
