//! # appdb
//!
//! Create, open and validate SQLite database files that belong to one
//! application at one schema version.
//!
//! Each database created here carries a 32-bit fingerprint in SQLite's
//! `user_version` header slot: the low 24 bits identify the application (a
//! truncated SHA-256 of its name) and the high 8 bits hold the schema version.
//! Opening a file checks the fingerprint and reports whether the file belongs
//! to another application or to an older or newer schema.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use appdb::{AppDb, AppDbError};
//!
//! fn main() -> Result<(), AppDbError> {
//!     let schema = ["CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT NOT NULL)"];
//!
//!     // Creates the file (and parent directories) on first use
//!     let db = AppDb::init("data/notes.db", "notes", 1, &schema)?;
//!     db.exec_bulk("INSERT INTO notes (body) VALUES (?1)", &["first", "second"])?;
//!     db.close()?;
//!
//!     // Later opens validate the fingerprint
//!     match AppDb::open("data/notes.db", "notes", 2) {
//!         Err(AppDbError::SchemaVersionMismatch { found, expected }) => {
//!             println!("needs migration from {} to {}", found, expected);
//!         }
//!         other => {
//!             other?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod storage;
pub mod utils;

// Re-export main API types
pub use config::AppDescriptor;
pub use error::{AppDbError, Result};
pub use storage::{
    AppDb, AppId, Fingerprint, compute_fingerprint, exec_bulk, exec_statement, init_app_db,
    inspect, open_app_db, open_app_db_no_validate,
};
