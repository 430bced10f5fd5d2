use axum::{Router, routing::post};

use crate::AppState;

mod dto;
pub(crate) mod handlers;

pub use dto::{LoginRequest, LoginResponse};
pub use handlers::login;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(login))
}
