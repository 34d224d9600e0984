//! Integration tests for user profiles

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_lifecycle() {
    let app = common::TestApp::new().await;
    let user = app.signup("profile").await;

    let (status, body) = app.get_auth("/api/v1/users/me", &user.token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, body) = app
        .post_auth(
            "/api/v1/users",
            &user.token,
            json!({"name": "Alex", "age": 30, "weightKg": 70.0, "heightCm": 175.0}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alex");
    assert_eq!(body["activityLevel"], "moderate");
    assert_eq!(body["bmi"], 22.9);

    let (status, _) = app
        .post_auth("/api/v1/users", &user.token, json!({"name": "Alex"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .put_auth(
            "/api/v1/users/me",
            &user.token,
            json!({"activityLevel": "active", "weightKg": 72.5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activityLevel"], "active");
    assert_eq!(body["weightKg"], 72.5);
    assert_eq!(body["age"], 30);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_profile_rejects_out_of_range_values() {
    let app = common::TestApp::new().await;
    let user = app.signup("profile_range").await;

    let (status, _) = app
        .post_auth(
            "/api/v1/users",
            &user.token,
            json!({"name": "Alex", "age": 200}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_auth(
            "/api/v1/users",
            &user.token,
            json!({"name": "Alex", "activityLevel": "couch"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
