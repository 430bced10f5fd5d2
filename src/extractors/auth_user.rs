use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header},
};
use uuid::Uuid;

use crate::{
    AppState,
    auth::token::verify_token,
    config::NotesAuth,
    error::ApiError,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Owner of a note being created. `None` when the service runs with
/// `NotesAuth::Anonymous`.
#[derive(Debug, Clone)]
pub struct NoteOwner(pub Option<AuthUser>);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let id = verify_token(token, &state.jwt_dec).map_err(|e| {
            tracing::debug!("rejected bearer token: {e}");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser { id })
    }
}

impl FromRequestParts<AppState> for NoteOwner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.notes_auth {
            NotesAuth::Anonymous => Ok(NoteOwner(None)),
            NotesAuth::Bearer => AuthUser::from_request_parts(parts, state)
                .await
                .map(|user| NoteOwner(Some(user))),
        }
    }
}
