//! Handler tests for the Users domain
//!
//! These drive the domain router directly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization and status codes
//! - Error bodies
//!
//! The full application (root, health, fallbacks) is tested in the API crate.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::with_demo_users()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_list_users_returns_seed_data() {
    let app = app();
    let (status, body) = send(&app, empty_request("GET", "/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["users"][0]["name"], "John Doe");
    assert_eq!(body["users"][1]["email"], "jane@example.com");
}

#[tokio::test]
async fn test_create_user_returns_201_with_next_id() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request("POST", "/users", json!({"name": "A", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 3);
    assert_eq!(body["age"], Value::Null);
    assert_eq!(body["phone"], Value::Null);
    assert_eq!(body["created_at"], body["updated_at"]);

    let user: User = serde_json::from_value(body).unwrap();
    assert_eq!(user.name, "A");
}

#[tokio::test]
async fn test_create_user_twice_is_duplicate() {
    let app = app();
    let request = || json_request("POST", "/users", json!({"name": "A", "email": "a@x.com"}));

    let (status, _) = send(&app, request()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, request()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Email already exists"}));
}

#[tokio::test]
async fn test_create_user_validation_errors() {
    let app = app();

    let (status, body) = send(&app, json_request("POST", "/users", json!({"name": "A"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: email");

    let (status, body) = send(
        &app,
        json_request("POST", "/users", json!({"name": "A", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");

    let (status, body) = send(&app, empty_request("POST", "/users")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request");
}

#[tokio::test]
async fn test_get_user_returns_200_and_404() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "john@example.com");

    let (status, body) = send(&app, empty_request("GET", "/users/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
async fn test_non_numeric_id_is_resource_not_found() {
    let app = app();
    let (status, body) = send(&app, empty_request("GET", "/users/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Resource not found");
}

#[tokio::test]
async fn test_put_replaces_and_clears_phone() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/users/1",
            json!({"name": "John Q", "email": "john@example.com", "age": 40}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "John Q");
    assert_eq!(body["age"], 40);
    assert_eq!(body["phone"], Value::Null);
}

#[tokio::test]
async fn test_put_missing_user_is_404_even_with_bad_payload() {
    let app = app();
    let (status, body) = send(&app, json_request("PUT", "/users/42", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_put_to_other_users_email_is_duplicate() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request("PUT", "/users/1", json!({"name": "J", "email": "jane@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_patch_age_only() {
    let app = app();
    let (_, before) = send(&app, empty_request("GET", "/users/1")).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, after) = send(&app, json_request("PATCH", "/users/1", json!({"age": 31}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["age"], 31);
    assert_eq!(after["name"], before["name"]);
    assert_eq!(after["email"], before["email"]);
    assert_eq!(after["phone"], before["phone"]);
    assert_eq!(after["created_at"], before["created_at"]);

    let before: User = serde_json::from_value(before).unwrap();
    let after: User = serde_json::from_value(after).unwrap();
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_patch_with_unknown_keys_only_touches_timestamp() {
    let app = app();
    let (_, before) = send(&app, empty_request("GET", "/users/1")).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, after) = send(
        &app,
        json_request("PATCH", "/users/1", json!({"nickname": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(after.get("nickname").is_none());
    for field in ["id", "name", "email", "age", "phone", "created_at"] {
        assert_eq!(after[field], before[field], "{field} changed");
    }
    assert_ne!(after["updated_at"], before["updated_at"]);
}

#[tokio::test]
async fn test_create_with_unknown_or_null_keys_reports_missing_name() {
    let app = app();

    for body in [json!({"foo": 1}), json!({"age": null})] {
        let (status, response) = send(&app, json_request("POST", "/users", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": "Missing required field: name"}));
    }
}

#[tokio::test]
async fn test_patch_bad_email() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request("PATCH", "/users/1", json!({"email": "bademail"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid email format"}));
}

#[tokio::test]
async fn test_patch_empty_body() {
    let app = app();
    let (status, body) = send(&app, json_request("PATCH", "/users/1", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");

    let (status, _) = send(&app, json_request("PATCH", "/users/77", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app();

    let (status, body) = send(&app, empty_request("DELETE", "/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert_eq!(body["deleted_user"]["id"], 1);

    let (status, _) = send(&app, empty_request("GET", "/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, empty_request("DELETE", "/users/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_deleted_id_is_not_reused() {
    let app = app();
    send(&app, empty_request("DELETE", "/users/2")).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/users", json!({"name": "New", "email": "new@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 3);
}
