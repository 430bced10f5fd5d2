use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    AppState,
    auth::password::hash_password,
    error::{ApiError, ApiResult},
    users::repo::{self, NewUser},
};

use super::dto::{CreateUserRequest, UserDto, UserNoteDto};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 3;

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid user payload", body = crate::error::ErrorBody),
        (status = 409, description = "Username already exists", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    let username = req.username.trim().to_string();
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash =
        hash_password(&req.password).map_err(|error| ApiError::Hash(error.to_string()))?;

    let res = repo::create_user(
        &state.db,
        NewUser {
            username,
            name: req.name,
            password_hash,
        },
    )
    .await;
    let user = match res {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
            return Err(ApiError::UsernameTaken);
        }
        Err(e) => return Err(ApiError::Db(e)),
    };

    tracing::info!(user_id = %user.id, username = %user.username, "user created");
    Ok((
        StatusCode::CREATED,
        Json(UserDto {
            id: user.id,
            username: user.username,
            name: user.name,
            notes: Vec::new(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users with their notes", body = [UserDto]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Users"
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<Vec<UserDto>>)> {
    let users = repo::list_users(&state.db).await.map_err(ApiError::Db)?;
    let indexed = repo::list_indexed_notes(&state.db)
        .await
        .map_err(ApiError::Db)?;

    let mut notes_by_user: HashMap<Uuid, Vec<UserNoteDto>> = HashMap::new();
    for n in indexed {
        notes_by_user.entry(n.user_id).or_default().push(UserNoteDto {
            id: n.id,
            content: n.content,
            important: n.important,
        });
    }

    let users = users
        .into_iter()
        .map(|u| UserDto {
            notes: notes_by_user.remove(&u.id).unwrap_or_default(),
            id: u.id,
            username: u.username,
            name: u.name,
        })
        .collect();

    Ok((StatusCode::OK, Json(users)))
}
