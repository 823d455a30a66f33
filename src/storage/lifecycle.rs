//! Create-or-open lifecycle for application databases
//!
//! A missing file is created, initialized with the caller's schema and stamped
//! with the application fingerprint. An existing file is opened and its
//! fingerprint checked. Nothing is rolled back on failure: a crash or error
//! halfway through creation can leave an empty or partially initialized file
//! behind for the caller to deal with.

use crate::config::AppDescriptor;
use crate::error::Result;
use crate::storage::database::AppDb;
use crate::storage::fingerprint::Fingerprint;
use crate::storage::schema::{ENABLE_FOREIGN_KEYS, init_schema};
use crate::storage::statements::exec_statement;
use crate::storage::validation::read_version_register;
use crate::utils::{create_empty_file, ensure_parent_directory, ensure_regular_file, path_exists};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

impl AppDb {
    /// Open the database at `path`, creating and initializing it first if
    /// nothing exists there yet.
    pub fn init<P: AsRef<Path>, S: AsRef<str>>(
        path: P,
        app_name: &str,
        schema_version: u8,
        schema: &[S],
    ) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("init: {} ({} v{})", path.display(), app_name, schema_version);

        if path_exists(path)? {
            return Self::open(path, app_name, schema_version);
        }

        ensure_parent_directory(path)?;
        create_empty_file(path)?;
        let db = Self::open_no_validate(path)?;
        if let Err(err) = init_schema(db.connection(), app_name, schema_version, schema) {
            db.close_quietly();
            return Err(err);
        }

        log::info!(
            "Created database {} for {} with schema version {}",
            path.display(),
            app_name,
            schema_version
        );
        Ok(db)
    }

    /// Open an existing database and check its fingerprint.
    ///
    /// The connection is closed before a validation error is returned.
    pub fn open<P: AsRef<Path>>(path: P, app_name: &str, schema_version: u8) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("open: {} ({} v{})", path.display(), app_name, schema_version);

        let db = Self::open_no_validate(path)?;
        if let Err(err) = db.validate(app_name, schema_version) {
            log::info!("Rejected database {}: {}", path.display(), err);
            db.close_quietly();
            return Err(err);
        }
        Ok(db)
    }

    /// Open an existing regular file without checking its fingerprint
    pub fn open_no_validate<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("open_no_validate: {}", path.display());

        let conn = open_connection(path)?;
        Ok(Self::from_parts(conn, path.to_path_buf()))
    }

    /// [`AppDb::init`] driven by a descriptor
    pub fn init_with<P: AsRef<Path>>(path: P, descriptor: &AppDescriptor) -> Result<Self> {
        Self::init(
            path,
            &descriptor.app_name,
            descriptor.schema_version,
            descriptor.schema.as_slice(),
        )
    }

    /// [`AppDb::open`] driven by a descriptor
    pub fn open_with<P: AsRef<Path>>(path: P, descriptor: &AppDescriptor) -> Result<Self> {
        Self::open(path, &descriptor.app_name, descriptor.schema_version)
    }
}

/// Open `path` read-write without creating it. The header is read right away
/// so a file that is not a SQLite database fails here rather than on first use.
fn open_connection(path: &Path) -> Result<Connection> {
    ensure_regular_file(path)?;

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.pragma_query_value(None, "schema_version", |row| row.get::<_, i64>(0))?;
    // foreign_keys is per connection and does not persist in the file
    exec_statement(&conn, ENABLE_FOREIGN_KEYS)?;
    Ok(conn)
}

/// Create or open the database at `path`; see [`AppDb::init`]
pub fn init_app_db<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    app_name: &str,
    schema_version: u8,
    schema: &[S],
) -> Result<AppDb> {
    AppDb::init(path, app_name, schema_version, schema)
}

/// Open and validate an existing database; see [`AppDb::open`]
pub fn open_app_db<P: AsRef<Path>>(path: P, app_name: &str, schema_version: u8) -> Result<AppDb> {
    AppDb::open(path, app_name, schema_version)
}

/// Open an existing database without validation; see [`AppDb::open_no_validate`]
pub fn open_app_db_no_validate<P: AsRef<Path>>(path: P) -> Result<AppDb> {
    AppDb::open_no_validate(path)
}

/// Read the fingerprint of an existing database without validating it
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<Fingerprint> {
    let conn = open_connection(path.as_ref())?;
    read_version_register(&conn)
}
