//! Integration tests for authentication endpoints

mod common;

use axum::http::StatusCode;
use common::{json, unique_email, TEST_PASSWORD};
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let body = json!({ "email": unique_email(), "password": TEST_PASSWORD });
    let (status, response) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    let response = json(&response);
    assert!(!response["access_token"].as_str().unwrap().is_empty());
    assert!(!response["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(response["token_type"], "Bearer");
    assert_eq!(response["expires_in"], 3600);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_creates_profile_from_initial_answers() {
    let app = common::TestApp::new().await;
    let user = app
        .register(json!({ "name": "Sam", "age": 30, "gender": "male" }))
        .await;

    let (status, response) = app.get_auth("/api/v1/profile", user.token()).await;
    assert_eq!(status, StatusCode::OK);

    let profile = json(&response);
    assert_eq!(profile["email"], user.email);
    assert_eq!(profile["name"], "Sam");
    assert_eq!(profile["gender"], "male");
    assert_eq!(profile["missing_fields"], json!(["height", "weight", "activity_level"]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;

    let body = json!({ "email": unique_email(), "password": TEST_PASSWORD });
    let (status, _) = app.post("/api/v1/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.post("/api/v1/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json(&response)["error"]["code"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_rejects_bad_input() {
    let app = common::TestApp::new().await;

    let bad_email = json!({ "email": "not-an-email", "password": TEST_PASSWORD });
    let (status, _) = app.post("/api/v1/auth/register", &bad_email.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let short_password = json!({ "email": unique_email(), "password": "short" });
    let (status, _) = app.post("/api/v1/auth/register", &short_password.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_goal = json!({
        "email": unique_email(),
        "password": TEST_PASSWORD,
        "profile": { "goal": "get_huge" }
    });
    let (status, response) = app.post("/api/v1/auth/register", &bad_goal.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&response)["error"]["field"], "goal");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success_and_me() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    // Emails are matched case-insensitively
    let body = json!({ "email": user.email.to_uppercase(), "password": TEST_PASSWORD });
    let (status, response) = app.post("/api/v1/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let token = json(&response)["access_token"].as_str().unwrap().to_string();
    let (status, response) = app.get_auth("/api/v1/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&response)["email"], user.email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "email": user.email, "password": "WrongPassword123!" });
    let (status, _) = app.post("/api/v1/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let body = json!({ "email": unique_email(), "password": TEST_PASSWORD });
    let (status, _) = app.post("/api/v1/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_token() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "refresh_token": user.tokens.refresh_token });
    let (status, response) = app.post("/api/v1/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!json(&response)["access_token"].as_str().unwrap().is_empty());

    // An access token cannot be used to refresh
    let body = json!({ "refresh_token": user.tokens.access_token });
    let (status, _) = app.post("/api/v1/auth/refresh", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
