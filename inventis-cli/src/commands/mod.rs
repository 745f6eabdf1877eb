//! Command implementations for the inventis CLI

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use inventis_server::{connect, Storage};

pub mod seed;
pub mod serve;

pub use seed::run_seed;
pub use serve::run_serve;

/// Connection options shared by every command that touches the database
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL: file:<path> for SQLite, postgres://... for PostgreSQL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Connect and migrate. A missing DATABASE_URL is fatal.
pub async fn open_storage(args: &DatabaseArgs) -> Result<Arc<dyn Storage>> {
    let database_url = args.database_url.as_deref().context(
        "DATABASE_URL must be set. Set via --database-url, DATABASE_URL env, or a .env file",
    )?;

    let storage = connect(database_url)
        .await
        .context("Failed to connect to database")?;
    storage
        .migrate()
        .await
        .context("Failed to run database migrations")?;

    Ok(storage)
}
