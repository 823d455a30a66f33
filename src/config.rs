//! Application descriptor
//!
//! An [`AppDescriptor`] bundles everything needed to create or validate an
//! application database: the application name, the schema version and the DDL
//! run when the file is first created. It can be built in code or loaded from
//! a JSON file:
//!
//! ```json
//! {
//!   "app_name": "notes",
//!   "schema_version": 2,
//!   "schema": ["CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT)"]
//! }
//! ```

use crate::error::{AppDbError, Result};
use crate::storage::Fingerprint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identity, schema version and creation DDL of an application database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub app_name: String,
    pub schema_version: u8,
    #[serde(default)]
    pub schema: Vec<String>,
}

impl AppDescriptor {
    pub fn new(app_name: impl Into<String>, schema_version: u8) -> Self {
        Self {
            app_name: app_name.into(),
            schema_version,
            schema: Vec::new(),
        }
    }

    /// Append one schema statement
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.schema.push(statement.into());
        self
    }

    /// Load a descriptor from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| AppDbError::io(path, e))?;
        let descriptor: Self = serde_json::from_str(&contents)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Save the descriptor as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| AppDbError::io(path, e))
    }

    /// Validate descriptor contents
    pub fn validate(&self) -> Result<()> {
        if self.app_name.is_empty() {
            return Err(AppDbError::Config("app_name must not be empty".to_string()));
        }
        if let Some(index) = self.schema.iter().position(|s| s.trim().is_empty()) {
            return Err(AppDbError::Config(format!(
                "schema statement {} is empty",
                index
            )));
        }
        Ok(())
    }

    /// Fingerprint a database created from this descriptor carries
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::compute(&self.app_name, self.schema_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builder() {
        let descriptor = AppDescriptor::new("notes", 2)
            .with_statement("CREATE TABLE a (x)")
            .with_statement("CREATE TABLE b (y)");
        assert_eq!(descriptor.schema.len(), 2);
        assert_eq!(descriptor.fingerprint(), Fingerprint::compute("notes", 2));
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_parse_without_schema() {
        let descriptor: AppDescriptor =
            serde_json::from_str(r#"{"app_name": "notes", "schema_version": 7}"#).unwrap();
        assert_eq!(descriptor, AppDescriptor::new("notes", 7));
    }

    #[test]
    fn test_schema_version_out_of_range() {
        let result: std::result::Result<AppDescriptor, _> =
            serde_json::from_str(r#"{"app_name": "notes", "schema_version": 256}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("app.json");
        let descriptor = AppDescriptor::new("notes", 1).with_statement("CREATE TABLE t (x)");

        descriptor.save_to_file(&path).unwrap();
        assert_eq!(AppDescriptor::from_file(&path).unwrap(), descriptor);
    }

    #[test]
    fn test_invalid_descriptor() {
        assert!(matches!(
            AppDescriptor::new("", 1).validate(),
            Err(AppDbError::Config(_))
        ));
        assert!(matches!(
            AppDescriptor::new("notes", 1).with_statement("  ").validate(),
            Err(AppDbError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = AppDescriptor::from_file(temp_dir.path().join("missing.json")).unwrap_err();
        assert!(err.is_filesystem());
    }
}
