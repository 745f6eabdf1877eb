//! Database layer - storage trait, backends, pools
//!
//! # Design Principles
//!
//! - Route code only sees `dyn Storage`; the backend is picked once at startup
//! - Bounded pools (max 5 connections), no Arc<Mutex<Connection>>
//! - Rely on DB constraints and upserts, no check-then-insert

pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod sqlite;
pub mod storage;

pub use pool::{connect, detect_backend};
pub use postgres::PgStorage;
pub use sqlite::SqliteStorage;
pub use storage::{Backend, Storage, StorageError};
