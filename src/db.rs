use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Opens a pool for `database_url`, creating the database file if needed.
///
/// Connections are never recycled, so `sqlite::memory:` with a single
/// connection keeps its data for the life of the pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await
}

pub async fn migrate(db: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(db).await
}
