use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// A note as listed in its owner's index.
#[derive(Debug, Clone, FromRow)]
pub struct IndexedNote {
    pub user_id: Uuid,
    pub id: Uuid,
    pub content: String,
    pub important: bool,
}

pub async fn create_user(db: &SqlitePool, new: NewUser) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, name, password_hash)
        VALUES (?, ?, ?, ?)
        RETURNING id, username, name, password_hash
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.username)
    .bind(new.name)
    .bind(new.password_hash)
    .fetch_one(db)
    .await
}

pub async fn find_by_username(db: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, name, password_hash
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await
}

pub async fn list_users(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, name, password_hash
        FROM users
        ORDER BY rowid
        "#,
    )
    .fetch_all(db)
    .await
}

/// Every user's notes index in append order, for all users at once.
pub async fn list_indexed_notes(db: &SqlitePool) -> Result<Vec<IndexedNote>, sqlx::Error> {
    sqlx::query_as::<_, IndexedNote>(
        r#"
        SELECT un.user_id, n.id, n.content, n.important
        FROM user_notes un
        JOIN notes n ON n.id = un.note_id
        ORDER BY un.user_id, un.position
        "#,
    )
    .fetch_all(db)
    .await
}

/// Note ids in the user's index, oldest first.
pub async fn note_ids(db: &SqlitePool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT note_id
        FROM user_notes
        WHERE user_id = ?
        ORDER BY position
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
