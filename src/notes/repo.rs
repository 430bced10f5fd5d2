use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
    pub user_id: Option<Uuid>,
}

/// A note joined with its owner's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct NoteWithOwner {
    pub id: Uuid,
    pub content: String,
    pub important: bool,
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub content: String,
    pub important: bool,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub content: Option<String>,
    pub important: Option<bool>,
}

pub async fn create_note(db: &SqlitePool, new: NewNote) -> Result<Note, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (id, content, important)
        VALUES (?, ?, ?)
        RETURNING id, content, important, user_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.content)
    .bind(new.important)
    .fetch_one(db)
    .await
}

/// Inserts the note and appends it to the owner's index in one transaction.
///
/// Returns `None`, with nothing written, if `user_id` names no user.
///
/// The first statement must stay a write: a deferred transaction that reads
/// first cannot upgrade its lock under contention and fails with
/// `SQLITE_BUSY` instead of waiting.
pub async fn create_owned_note(
    db: &SqlitePool,
    user_id: Uuid,
    new: NewNote,
) -> Result<Option<Note>, sqlx::Error> {
    let mut tx = db.begin().await?;

    let res = sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (id, content, important, user_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, content, important, user_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.content)
    .bind(new.important)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await;
    let note = match res {
        Ok(note) => note,
        Err(sqlx::Error::Database(db_error)) if db_error.is_foreign_key_violation() => {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    sqlx::query(
        r#"
        INSERT INTO user_notes (user_id, note_id)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(note.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(note))
}

pub async fn get_note(db: &SqlitePool, note_id: Uuid) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        r#"
        SELECT id, content, important, user_id
        FROM notes
        WHERE id = ?
        "#,
    )
    .bind(note_id)
    .fetch_optional(db)
    .await
}

pub async fn list_notes(db: &SqlitePool) -> Result<Vec<NoteWithOwner>, sqlx::Error> {
    sqlx::query_as::<_, NoteWithOwner>(
        r#"
        SELECT n.id, n.content, n.important, n.user_id, u.username, u.name
        FROM notes n
        LEFT JOIN users u ON u.id = n.user_id
        ORDER BY n.rowid
        "#,
    )
    .fetch_all(db)
    .await
}

/// Applies `changes` and returns the stored note, or `None` if there is none.
pub async fn update_note(
    db: &SqlitePool,
    note_id: Uuid,
    changes: NoteChanges,
) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(
        r#"
        UPDATE notes
        SET content = COALESCE(?, content),
            important = COALESCE(?, important)
        WHERE id = ?
        RETURNING id, content, important, user_id
        "#,
    )
    .bind(changes.content)
    .bind(changes.important)
    .bind(note_id)
    .fetch_optional(db)
    .await
}

/// Deletes the note and its owner-index entry. Returns whether a note existed.
pub async fn delete_note(db: &SqlitePool, note_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM user_notes WHERE note_id = ?")
        .bind(note_id)
        .execute(&mut *tx)
        .await?;

    let res = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(note_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(res.rows_affected() == 1)
}
