//! Storage Layer - schema declaration and SQLite-backed persistence
//!
//! One table:
//! - uspa_records(id, division, weight_class, lift, name, kilos, pounds, date,
//!   location, event, status, has_record)
//!
//! indexed on location, event, status, division, weight_class and has_record.

pub mod report;
pub mod schema;
pub mod sqlite;

pub use report::SchemaReport;
pub use schema::Dialect;
pub use sqlite::SqliteStore;
