//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::{health, root};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Management API",
        description = "In-memory user directory with CRUD endpoints",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(health::health_check, root::root),
    components(schemas(health::HealthResponse, root::RootResponse)),
    tags(
        (name = "Health", description = "Liveness and discovery endpoints")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.info.version = env!("CARGO_PKG_VERSION").to_string();
        doc.merge(domain_users::ApiDoc::openapi());
        doc
    }
}
