use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    InvalidCredentials,
    NotFound,
    UsernameTaken,
    Db(sqlx::Error),
    Hash(String),
    Token(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

fn internal() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "INTERNAL",
            message: Some("Internal server error".to_string()),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "BAD_REQUEST",
                    message: Some(msg),
                }),
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "token invalid",
                    message: None,
                }),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "INVALID_CREDENTIALS",
                    message: Some("invalid username or password".to_string()),
                }),
            )
                .into_response(),
            // empty body, as for a missing note on GET
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::UsernameTaken => (
                StatusCode::CONFLICT,
                Json(ErrorBody {
                    error: "USERNAME_TAKEN",
                    message: Some("username must be unique".to_string()),
                }),
            )
                .into_response(),
            ApiError::Db(e) => {
                tracing::error!("db error: {e}");
                internal()
            }
            ApiError::Hash(msg) => {
                tracing::error!("hash error: {msg}");
                internal()
            }
            ApiError::Token(msg) => {
                tracing::error!("token error: {msg}");
                internal()
            }
        }
    }
}
