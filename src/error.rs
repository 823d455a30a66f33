//! Error types for appdb
//!
//! Every failure in this crate is returned to the caller unchanged. Validation
//! and schema failures carry structured fields so callers can tell a foreign
//! database apart from a stale schema, a bad file or an I/O problem.

use crate::storage::AppId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for appdb operations
#[derive(Error, Debug)]
pub enum AppDbError {
    /// Filesystem errors (stat, directory or file creation)
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path exists but is a directory, socket, etc.
    #[error("Not a regular file: {}", .path.display())]
    NotRegularFile { path: PathBuf },

    /// SQLite errors: malformed file, prepare or execute failures
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A schema statement failed while initializing a new database
    #[error("Error {source} creating schema on statement {statement}")]
    Schema {
        statement: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The database was created by a different application
    #[error("Incorrect database app id: got {found} - expected {expected}")]
    AppIdMismatch { found: AppId, expected: AppId },

    /// The database belongs to this application but has another schema version
    #[error("Incorrect schema version: got {found} - expected {expected}")]
    SchemaVersionMismatch { found: u8, expected: u8 },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppDbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppDbError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the file belongs to another application
    pub fn is_identity_mismatch(&self) -> bool {
        matches!(self, AppDbError::AppIdMismatch { .. })
    }

    /// True when the file belongs to this application but the schema differs
    pub fn is_schema_version_mismatch(&self) -> bool {
        matches!(self, AppDbError::SchemaVersionMismatch { .. })
    }

    /// True for errors raised by the filesystem rather than by SQLite
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            AppDbError::Io { .. } | AppDbError::NotRegularFile { .. }
        )
    }
}

/// Result type alias for appdb operations
pub type Result<T> = std::result::Result<T, AppDbError>;
