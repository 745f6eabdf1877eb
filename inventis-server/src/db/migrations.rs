//! Schema creation for both backends
//!
//! Statements are idempotent (`IF NOT EXISTS`) and run on every start.

use sqlx::{PgPool, SqlitePool};

use super::StorageError;

const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contact_submissions (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        consent BOOLEAN NOT NULL DEFAULT TRUE,
        user_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS newsletter_subscriptions (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS regions (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        description TEXT NOT NULL,
        sensors INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

// created_at holds ISO-8601 text on SQLite
const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contact_submissions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        subject TEXT NOT NULL,
        message TEXT NOT NULL,
        consent BOOLEAN NOT NULL DEFAULT 1,
        user_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS newsletter_subscriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        active BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS regions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(100) NOT NULL,
        description TEXT NOT NULL,
        sensors INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
];

/// Run all migrations against PostgreSQL
pub async fn run_postgres(pool: &PgPool) -> Result<(), StorageError> {
    tracing::info!("Running PostgreSQL migrations...");
    for statement in POSTGRES_SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    tracing::info!("PostgreSQL migrations complete");
    Ok(())
}

/// Run all migrations against SQLite
pub async fn run_sqlite(pool: &SqlitePool) -> Result<(), StorageError> {
    tracing::info!("Running SQLite migrations...");
    for statement in SQLITE_SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    tracing::info!("SQLite migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_backends_create_the_same_tables() {
        for table in [
            "users",
            "contact_submissions",
            "newsletter_subscriptions",
            "regions",
        ] {
            let needle = format!("CREATE TABLE IF NOT EXISTS {table} (");
            assert!(POSTGRES_SCHEMA.iter().any(|s| s.contains(&needle)));
            assert!(SQLITE_SCHEMA.iter().any(|s| s.contains(&needle)));
        }
    }

    #[test]
    fn email_and_username_are_unique() {
        for schema in [POSTGRES_SCHEMA, SQLITE_SCHEMA] {
            let joined = schema.join("\n");
            assert!(joined.contains("username TEXT NOT NULL UNIQUE"));
            assert!(joined.contains("email TEXT NOT NULL UNIQUE"));
        }
    }
}
