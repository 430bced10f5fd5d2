use axum::{Router, routing::get};

use crate::AppState;
mod dto;
pub(crate) mod handlers;

pub use dto::{CreateUserRequest, UserDto, UserNoteDto};
pub use handlers::{create_user, list_users};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_users).post(create_user))
}
