use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    auth::{http::{LoginRequest, LoginResponse}, password::verify_password, token::issue_token},
    error::{ApiError, ApiResult},
    users::repo,
};

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token for the user", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(login_request): Json<LoginRequest>,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    let username = login_request.username.trim();
    let user = repo::find_by_username(&state.db, username)
        .await
        .map_err(ApiError::Db)?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify_password(&login_request.password, &user.password_hash)
        .map_err(|e| ApiError::Hash(e.to_string()))?;
    if !valid {
        tracing::info!(%username, "login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_token(user.id, &state.jwt_enc, state.token_ttl)
        .map_err(|e| ApiError::Token(e.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            username: user.username,
            name: user.name,
        }),
    ))
}
