//! Storage functionality for appdb
//!
//! This module provides the database lifecycle on top of embedded SQLite.

pub mod database;
pub mod fingerprint;
pub mod lifecycle;
pub mod schema;
pub mod statements;
pub mod validation;

// Re-export main types
pub use database::AppDb;
pub use fingerprint::{AppId, Fingerprint, compute_fingerprint};
pub use lifecycle::{init_app_db, inspect, open_app_db, open_app_db_no_validate};
pub use statements::{exec_bulk, exec_statement};
