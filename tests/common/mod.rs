#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use jsonwebtoken::{DecodingKey, EncodingKey};
use notes_api::{
    AppState,
    app::router::build_router,
    auth::{password::hash_password, token::issue_token},
    config::NotesAuth,
    db,
    users::repo::{self as users_repo, NewUser},
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";

pub struct TestApp {
    app: Router,
    pub db: SqlitePool,
}

pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

pub async fn test_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory sqlite");
    db::migrate(&pool).await.expect("failed to run migrations");
    pool
}

pub async fn create_user(db: &SqlitePool, username: &str, password: &str) -> Uuid {
    users_repo::create_user(
        db,
        NewUser {
            username: username.to_string(),
            name: Some(format!("{username} name")),
            password_hash: hash_password(password).expect("failed to hash password"),
        },
    )
    .await
    .expect("failed to create test user")
    .id
}

pub fn token_for(user_id: Uuid) -> String {
    issue_token(
        user_id,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        time::Duration::minutes(5),
    )
    .expect("failed to sign test token")
}

impl TestApp {
    pub async fn new(notes_auth: NotesAuth) -> Self {
        let db = test_pool().await;
        let state = AppState {
            db: db.clone(),
            jwt_enc: EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
            jwt_dec: DecodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
            token_ttl: time::Duration::minutes(5),
            notes_auth,
        };

        Self {
            app: build_router(state),
            db,
        }
    }

    pub async fn seed_user(&self, username: &str) -> TestUser {
        let id = create_user(&self.db, username, "password-123").await;
        TestUser {
            id,
            username: username.to_string(),
            token: token_for(id),
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        self.request_json(Method::POST, path, Some(body), bearer)
            .await
    }

    pub async fn put_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request_json(Method::PUT, path, Some(body), None).await
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        self.request_json(Method::GET, path, None, None).await
    }

    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let (status, bytes) = self.request(Method::GET, path, None, None).await;
        let text = String::from_utf8(bytes).expect("response is not valid utf-8 text");
        (status, text)
    }

    /// Status and raw body, for endpoints that answer with an empty body.
    pub async fn send(&self, method: Method, path: &str) -> (StatusCode, Vec<u8>) {
        self.request(method, path, None, None).await
    }

    pub async fn post_with_authorization(
        &self,
        path: &str,
        body: Value,
        authorization: &str,
    ) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::AUTHORIZATION, authorization)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&body).expect("failed to serialize request body"),
            ))
            .expect("failed to build request");
        let (status, bytes) = self.execute(req).await;
        (status, parse_json(&bytes))
    }

    async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.request(method, path, body, bearer).await;
        (status, parse_json(&bytes))
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Vec<u8>) {
        let mut req_builder = Request::builder().method(method).uri(path);

        if let Some(token) = bearer {
            req_builder = req_builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(body) => {
                req_builder = req_builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).expect("failed to serialize request body"))
            }
            None => Body::empty(),
        };

        let req = req_builder.body(body).expect("failed to build request");
        self.execute(req).await
    }

    async fn execute(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request execution failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("failed to read response body");

        (status, bytes.to_vec())
    }
}

fn parse_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes).expect("response is not valid json")
}
