//! HTTP server command
//!
//! Connects, migrates, seeds default regions, then serves until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use inventis_server::{run_server, seed_regions, ServerConfig};

use super::{open_storage, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "INVENTIS_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Directory holding the built landing page, served for non-API paths
    #[arg(long, env = "INVENTIS_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Skip seeding default regions at startup
    #[arg(long)]
    pub no_seed: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting inventis server on {}", args.bind);

    let storage = open_storage(&args.database).await?;

    // Seed before the listener is bound so no request sees a half-seeded table
    if !args.no_seed {
        seed_regions(storage.as_ref())
            .await
            .context("Failed to seed default regions")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        static_dir: args.static_dir,
    };

    // Run server (blocks until shutdown)
    run_server(storage, config).await.context("Server error")?;

    Ok(())
}
