use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ErrorResponse, IdPath, JsonBody};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::UserResult;
use crate::models::{User, UserPatch, UserPayload};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const USER_DELETED: &str = "User deleted successfully";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, replace_user, patch_user, delete_user),
    components(schemas(
        User,
        UserPayload,
        UserPatch,
        ListUsersResponse,
        DeleteUserResponse,
        ErrorResponse
    )),
    tags(
        (name = "Users", description = "In-memory user directory")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .with_state(shared_service)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    pub message: String,
    pub deleted_user: User,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users with their count", body = ListUsersResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<ListUsersResponse>> {
    let (users, count) = service.list_users().await?;
    Ok(Json(ListUsersResponse { users, count }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failed or email already exists", body = ErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<UserPayload>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<User>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace every field of a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, description = "Validation failed or email already exists", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn replace_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<UserPayload>,
) -> UserResult<Json<User>> {
    let user = service.replace_user(id, input).await?;
    Ok(Json(user))
}

/// Update only the supplied fields of a user
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation failed or email already exists", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn patch_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<UserPatch>,
) -> UserResult<Json<User>> {
    let user = service.patch_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<DeleteUserResponse>> {
    let deleted_user = service.delete_user(id).await?;
    Ok(Json(DeleteUserResponse {
        message: USER_DELETED.to_string(),
        deleted_user,
    }))
}
