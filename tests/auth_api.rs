mod common;

use axum::http::StatusCode;
use notes_api::config::NotesAuth;
use serde_json::{Value, json};

use crate::common::TestApp;

#[tokio::test]
async fn login_issues_token_usable_for_creating_notes() {
    let app = TestApp::new(NotesAuth::Bearer).await;
    let user = app.seed_user("mluukkai").await;

    let (status, login_json) = app
        .post_json(
            "/api/login",
            json!({ "username": "mluukkai", "password": "password-123" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login_json["username"], "mluukkai");
    assert_eq!(login_json["name"], "mluukkai name");

    let token = login_json
        .get("token")
        .and_then(Value::as_str)
        .expect("login response misses token");

    let (status, note) = app
        .post_json("/api/notes", json!({ "content": "via login" }), Some(token))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["user"], user.id.to_string());
}

#[tokio::test]
async fn login_with_wrong_password_returns_unauthorized() {
    let app = TestApp::new(NotesAuth::Bearer).await;
    app.seed_user("root").await;

    let (status, error_json) = app
        .post_json(
            "/api/login",
            json!({ "username": "root", "password": "wrong-password" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_json["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn login_with_unknown_user_returns_unauthorized() {
    let app = TestApp::new(NotesAuth::Bearer).await;

    let (status, error_json) = app
        .post_json(
            "/api/login",
            json!({ "username": "nobody", "password": "password-123" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_json["error"], "INVALID_CREDENTIALS");
}
