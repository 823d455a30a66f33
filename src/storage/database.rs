//! Application database handle
//!
//! [`AppDb`] wraps an open SQLite connection together with the path it was
//! opened from. Constructors live in [`crate::storage::lifecycle`]; this
//! module holds the operations available once a handle exists.
//!
//! Thread-safety follows `rusqlite::Connection`: the handle is `Send` but not
//! `Sync`, and no extra locking is added here.

use crate::error::{AppDbError, Result};
use crate::storage::fingerprint::Fingerprint;
use crate::storage::statements;
use crate::storage::validation;
use rusqlite::{Connection, ToSql};
use std::path::{Path, PathBuf};

/// Open handle to an application database file
#[derive(Debug)]
pub struct AppDb {
    conn: Connection,
    path: PathBuf,
}

impl AppDb {
    pub(crate) fn from_parts(conn: Connection, path: PathBuf) -> Self {
        Self { conn, path }
    }

    /// Path the database was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow the underlying connection for application queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access, needed for `rusqlite` transactions
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Give up the handle and keep the raw connection
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Decode the fingerprint currently stored in the file
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        validation::read_version_register(&self.conn)
    }

    /// Re-run validation against `app_name` / `schema_version`
    pub fn validate(&self, app_name: &str, schema_version: u8) -> Result<()> {
        validation::validate(&self.conn, app_name, schema_version)
    }

    /// See [`statements::exec_statement`]
    pub fn exec_statement(&self, sql: &str) -> Result<()> {
        statements::exec_statement(&self.conn, sql)
    }

    /// See [`statements::exec_bulk`]
    pub fn exec_bulk<T: ToSql>(&self, sql: &str, values: &[T]) -> Result<()> {
        statements::exec_bulk(&self.conn, sql, values)
    }

    /// Close the connection, reporting any error SQLite raises while doing so
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| {
            log::warn!("Failed to close database {}: {}", path.display(), e);
            AppDbError::Database(e)
        })
    }

    /// Close on an error path where the original error takes precedence
    pub(crate) fn close_quietly(self) {
        let _ = self.close();
    }
}
