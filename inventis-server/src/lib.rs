//! inventis-server: HTTP API behind the Inventis Labs landing page
//!
//! Persists contact-form submissions, newsletter subscriptions and the
//! coverage regions shown on the page. Storage is PostgreSQL in production
//! and a SQLite file for local development, chosen from `DATABASE_URL`.

pub mod db;
pub mod http;
pub mod models;
pub mod seed;

#[cfg(test)]
pub(crate) mod test_support;

pub use db::{connect, Storage, StorageError};
pub use http::{run_server, ServerConfig};
pub use seed::seed_regions;
