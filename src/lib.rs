use jsonwebtoken::{DecodingKey, EncodingKey};
use sqlx::SqlitePool;

use crate::config::{Config, NotesAuth};

pub mod app;
pub mod auth;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
mod extractors;
pub mod notes;
pub mod users;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_enc: EncodingKey,
    pub jwt_dec: DecodingKey,
    pub token_ttl: time::Duration,
    pub notes_auth: NotesAuth,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &Config) -> Self {
        Self {
            db,
            jwt_enc: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            jwt_dec: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl: time::Duration::minutes(config.token_ttl_minutes),
            notes_auth: config.notes_auth,
        }
    }
}
