//! Schema initialization for newly created databases

use crate::error::{AppDbError, Result};
use crate::storage::fingerprint::Fingerprint;
use crate::storage::statements::exec_statement;
use rusqlite::Connection;

/// SQL enabling foreign key enforcement for the current connection
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON;";

/// SQL writing `fingerprint` into the `user_version` register
pub fn set_user_version_sql(fingerprint: Fingerprint) -> String {
    format!("PRAGMA user_version = {};", fingerprint.to_register())
}

/// Ordered statements run on a new database: the fingerprint first, then
/// foreign keys, then the caller's schema in the order given.
pub fn schema_init_statements<S: AsRef<str>>(
    app_name: &str,
    schema_version: u8,
    schema: &[S],
) -> Vec<String> {
    let mut statements = Vec::with_capacity(schema.len() + 2);
    statements.push(set_user_version_sql(Fingerprint::compute(
        app_name,
        schema_version,
    )));
    statements.push(ENABLE_FOREIGN_KEYS.to_string());
    statements.extend(schema.iter().map(|s| s.as_ref().to_string()));
    statements
}

/// Run the schema initialization statements one by one.
///
/// Stops at the first failure and reports the offending statement. Statements
/// already applied are not rolled back.
pub fn init_schema<S: AsRef<str>>(
    conn: &Connection,
    app_name: &str,
    schema_version: u8,
    schema: &[S],
) -> Result<()> {
    log::debug!("init_schema: {} v{}", app_name, schema_version);
    for statement in schema_init_statements(app_name, schema_version, schema) {
        if let Err(err) = exec_statement(conn, &statement) {
            return Err(match err {
                AppDbError::Database(source) => AppDbError::Schema { statement, source },
                other => other,
            });
        }
    }
    log::info!(
        "Initialized schema for {} with schema version {}",
        app_name,
        schema_version
    );
    Ok(())
}
