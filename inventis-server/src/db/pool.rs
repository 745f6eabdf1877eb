//! Connection pools and backend selection
//!
//! `connect` looks at the connection string's scheme and returns the
//! matching [`Storage`] implementation behind an `Arc<dyn Storage>`.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};

use super::{Backend, PgStorage, SqliteStorage, Storage, StorageError};

/// Default maximum connections for the pool.
/// Kept low; the site sees light, bursty traffic.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Decide which backend a connection string points at.
///
/// - `file:<path>` and `sqlite:...` → SQLite
/// - `postgres://` and `postgresql://` → PostgreSQL
pub fn detect_backend(database_url: &str) -> Result<Backend, StorageError> {
    if database_url.starts_with("file:") || database_url.starts_with("sqlite:") {
        Ok(Backend::Sqlite)
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
    {
        Ok(Backend::Postgres)
    } else {
        // Only the scheme is reported so credentials never reach the logs.
        let scheme = database_url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .unwrap_or("")
            .to_owned();
        Err(StorageError::UnsupportedUrl { scheme })
    }
}

/// Open the store named by `database_url`.
///
/// # Errors
///
/// Returns an error for unknown schemes or if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let storage = connect("file:./inventis.db").await?;
/// storage.migrate().await?;
/// ```
pub async fn connect(database_url: &str) -> Result<Arc<dyn Storage>, StorageError> {
    let backend = detect_backend(database_url)?;
    tracing::info!(backend = backend.as_str(), "Connecting to database");

    let storage: Arc<dyn Storage> = match backend {
        Backend::Postgres => Arc::new(PgStorage::new(create_pg_pool(database_url).await?)),
        Backend::Sqlite => Arc::new(SqliteStorage::new(create_sqlite_pool(database_url).await?)),
    };
    Ok(storage)
}

/// Create a PostgreSQL connection pool.
pub async fn create_pg_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Create a SQLite connection pool, creating the database file if needed.
///
/// In-memory databases are pinned to a single long-lived connection, since
/// every new connection would otherwise see its own empty database.
pub async fn create_sqlite_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = sqlite_options(database_url)?;
    let in_memory = database_url.contains(":memory:");

    let mut pool = SqlitePoolOptions::new();
    pool = if in_memory {
        pool.max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        pool.max_connections(DEFAULT_MAX_CONNECTIONS)
    };

    pool.connect_with(options).await
}

fn sqlite_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    let options = match database_url.strip_prefix("file:") {
        Some(":memory:") => SqliteConnectOptions::from_str("sqlite::memory:")?,
        Some(path) => SqliteConnectOptions::new().filename(Path::new(path)),
        None => SqliteConnectOptions::from_str(database_url)?,
    };
    Ok(options.create_if_missing(true).foreign_keys(true))
}
