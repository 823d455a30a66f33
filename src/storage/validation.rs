//! Fingerprint validation for existing databases

use crate::error::{AppDbError, Result};
use crate::storage::fingerprint::Fingerprint;
use rusqlite::Connection;

/// Read and decode the `user_version` register
pub fn read_version_register(conn: &Connection) -> Result<Fingerprint> {
    let register: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(Fingerprint::from_register(register))
}

/// Compare a stored fingerprint with the expected one.
///
/// A differing app id is reported ahead of a differing schema version; only
/// one mismatch is surfaced.
pub fn check_fingerprint(stored: Fingerprint, expected: Fingerprint) -> Result<()> {
    if stored == expected {
        return Ok(());
    }
    if stored.app_id != expected.app_id {
        return Err(AppDbError::AppIdMismatch {
            found: stored.app_id,
            expected: expected.app_id,
        });
    }
    Err(AppDbError::SchemaVersionMismatch {
        found: stored.schema_version,
        expected: expected.schema_version,
    })
}

/// Check that `conn` was created by `app_name` at `schema_version`
pub fn validate(conn: &Connection, app_name: &str, schema_version: u8) -> Result<()> {
    log::debug!("validate: {} v{}", app_name, schema_version);
    let stored = read_version_register(conn)?;
    check_fingerprint(stored, Fingerprint::compute(app_name, schema_version))
}
