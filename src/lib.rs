//! # uspa-records - USPA powerlifting records table
//!
//! Owns the shape of the `uspa_records` table that the bulk uploader writes
//! and the records website reads.
//!
//! The crate provides:
//! - Typed column and index descriptors rendered to SQLite or PostgreSQL DDL
//! - Idempotent schema application through a SQLite-backed store
//! - Catalog inspection reporting missing columns or indexes
//! - The minimal row contract (insert with engine defaults, lookup by indexed column)

pub mod record;
pub mod storage;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use record::{FilterValue, IndexedColumn, NewRecord, UspaRecord};
pub use storage::{Dialect, SchemaReport, SqliteStore};

/// Result type alias for uspa-records operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for uspa-records operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Not an indexed column: {0}")]
    InvalidColumn(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unknown SQL dialect: {0}")]
    InvalidDialect(String),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),
}
