//! Thin statement execution helpers
//!
//! Each helper owns its prepared statement for the duration of the call; the
//! statement is finalized when it goes out of scope, on success and on error.

use crate::error::Result;
use rusqlite::{Connection, Rows, ToSql, params};

/// Prepare and run one parameterless statement, discarding any result rows
pub fn exec_statement(conn: &Connection, sql: &str) -> Result<()> {
    log::debug!("exec_statement: {}", sql);
    let mut stmt = conn.prepare(sql)?;
    drain(stmt.query([])?)?;
    Ok(())
}

/// Prepare `sql` once and run it for each value in order, binding the value
/// as the single parameter. Stops at the first failing execution.
pub fn exec_bulk<T: ToSql>(conn: &Connection, sql: &str, values: &[T]) -> Result<()> {
    log::debug!("exec_bulk: {} ({} values)", sql, values.len());
    let mut stmt = conn.prepare(sql)?;
    for value in values {
        drain(stmt.query(params![value])?)?;
    }
    Ok(())
}

fn drain(mut rows: Rows<'_>) -> rusqlite::Result<()> {
    while rows.next()?.is_some() {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppDbError;

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM names", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_exec_statement_runs_ddl() {
        let conn = Connection::open_in_memory().unwrap();
        exec_statement(&conn, "CREATE TABLE names (name TEXT NOT NULL)").unwrap();
        exec_statement(&conn, "INSERT INTO names (name) VALUES ('a')").unwrap();
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn test_exec_statement_discards_rows() {
        let conn = Connection::open_in_memory().unwrap();
        exec_statement(&conn, "PRAGMA user_version").unwrap();
        exec_statement(&conn, "SELECT 1 UNION ALL SELECT 2").unwrap();
    }

    #[test]
    fn test_exec_statement_reports_parse_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = exec_statement(&conn, "INVALID SQL;").unwrap_err();
        assert!(matches!(err, AppDbError::Database(_)));
    }

    #[test]
    fn test_exec_bulk_inserts_in_order() {
        let conn = Connection::open_in_memory().unwrap();
        exec_statement(
            &conn,
            "CREATE TABLE names (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        )
        .unwrap();

        exec_bulk(
            &conn,
            "INSERT INTO names (name) VALUES (?1)",
            &["first", "second", "third"],
        )
        .unwrap();

        let mut stmt = conn.prepare("SELECT name FROM names ORDER BY id").unwrap();
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_exec_bulk_empty_values() {
        let conn = Connection::open_in_memory().unwrap();
        exec_statement(&conn, "CREATE TABLE names (name TEXT NOT NULL)").unwrap();

        let values: [&str; 0] = [];
        exec_bulk(&conn, "INSERT INTO names (name) VALUES (?1)", &values).unwrap();
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_exec_bulk_stops_at_first_error() {
        let conn = Connection::open_in_memory().unwrap();
        exec_statement(&conn, "CREATE TABLE names (name TEXT NOT NULL UNIQUE)").unwrap();

        let err = exec_bulk(
            &conn,
            "INSERT INTO names (name) VALUES (?1)",
            &["a", "b", "a", "c"],
        )
        .unwrap_err();
        assert!(matches!(err, AppDbError::Database(_)));
        assert_eq!(count(&conn), 2);
    }

    #[test]
    fn test_exec_bulk_reports_prepare_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = exec_bulk(&conn, "INSERT INTO missing VALUES (?1)", &[1i64]).unwrap_err();
        assert!(matches!(err, AppDbError::Database(_)));
    }
}
