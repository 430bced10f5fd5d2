use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    extractors::auth_user::NoteOwner,
    notes::repo::{self, NewNote, NoteChanges},
};

use super::dto::{CreateNoteRequest, NoteDto, NoteListItemDto, NoteOwnerDto, UpdateNoteRequest};

fn require_content(content: Option<String>) -> ApiResult<String> {
    match content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(ApiError::BadRequest("content is required".to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "All notes with their owners", body = [NoteListItemDto]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn list_notes(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Vec<NoteListItemDto>>)> {
    let rows = repo::list_notes(&state.db).await.map_err(ApiError::Db)?;

    let notes = rows
        .into_iter()
        .map(|r| NoteListItemDto {
            id: r.id,
            content: r.content,
            important: r.important,
            user: r.user_id.zip(r.username).map(|(id, username)| NoteOwnerDto {
                id,
                username,
                name: r.name,
            }),
        })
        .collect();

    Ok((StatusCode::OK, Json(notes)))
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note id")
    ),
    responses(
        (status = 200, description = "Note", body = NoteDto),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn get_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    let note = repo::get_note(&state.db, note_id)
        .await
        .map_err(ApiError::Db)?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, Json(note.into())))
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteDto),
        (status = 400, description = "Invalid note payload", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn create_note(
    NoteOwner(owner): NoteOwner,
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    let new = NewNote {
        content: require_content(request.content)?,
        important: request.important.unwrap_or(false),
    };

    let note = match owner {
        Some(user) => repo::create_owned_note(&state.db, user.id, new)
            .await
            .map_err(ApiError::Db)?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user.id, "token subject has no user");
                ApiError::Unauthorized
            })?,
        None => repo::create_note(&state.db, new)
            .await
            .map_err(ApiError::Db)?,
    };

    tracing::info!(note_id = %note.id, "note created");
    Ok((StatusCode::CREATED, Json(note.into())))
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note id")
    ),
    responses(
        (status = 204, description = "Note deleted, or there was none"),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = repo::delete_note(&state.db, note_id)
        .await
        .map_err(ApiError::Db)?;

    if deleted {
        tracing::info!(%note_id, "note deleted");
    }

    Ok(StatusCode::NO_CONTENT) // 204 either way
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note id")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Updated note", body = NoteDto),
        (status = 400, description = "Invalid note payload", body = crate::error::ErrorBody),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Notes"
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    let changes = NoteChanges {
        content: request
            .content
            .map(|content| require_content(Some(content)))
            .transpose()?,
        important: request.important,
    };

    let note = repo::update_note(&state.db, note_id, changes)
        .await
        .map_err(ApiError::Db)?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, Json(note.into())))
}
