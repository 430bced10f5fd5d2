use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::notes::repo::Note;

#[derive(Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub content: Option<String>,
    pub important: Option<bool>,
}

/// Absent or `null` fields are left unchanged.
#[derive(Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub content: Option<String>,
    pub important: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct NoteDto {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Uuid>,
}

impl From<Note> for NoteDto {
    fn from(note: Note) -> Self {
        NoteDto {
            id: note.id,
            content: note.content,
            important: note.important,
            user: note.user_id,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct NoteOwnerDto {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct NoteListItemDto {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<NoteOwnerDto>,
}
