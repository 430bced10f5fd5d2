use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserNoteDto {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
}

#[derive(Serialize, ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub notes: Vec<UserNoteDto>,
}
