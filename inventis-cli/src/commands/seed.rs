//! Seed command - insert default coverage regions into an empty table

use anyhow::{Context, Result};
use clap::Parser;

use inventis_server::seed_regions;

use super::{open_storage, DatabaseArgs};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let storage = open_storage(&args.database).await?;
    let inserted = seed_regions(storage.as_ref())
        .await
        .context("Failed to seed default regions")?;

    if inserted == 0 {
        tracing::info!("Regions already present, nothing to do");
    } else {
        tracing::info!(inserted, "Seeded default regions");
    }
    Ok(())
}
