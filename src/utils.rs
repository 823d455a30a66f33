//! Filesystem helpers for appdb
//!
//! Thin wrappers around `std::fs` that attach the offending path to errors.

use crate::error::{AppDbError, Result};
use std::fs;
use std::path::Path;

/// Permissions for directories created on the way to a new database file
pub const DIRECTORY_MODE: u32 = 0o700;

/// Return `Ok(false)` when nothing exists at `path`
pub fn path_exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppDbError::io(path, e)),
    }
}

/// Fail unless `path` exists and is a regular file
pub fn ensure_regular_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| AppDbError::io(path, e))?;
    if !metadata.is_file() {
        return Err(AppDbError::NotRegularFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Create directory (and parents) if it doesn't exist, owner-only on Unix
pub fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIRECTORY_MODE);
    }
    builder.create(path).map_err(|e| AppDbError::io(path, e))
}

/// Create the parent directories of `path`
pub fn ensure_parent_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) => ensure_directory(parent),
        None => Ok(()),
    }
}

/// Create an empty file at `path`, truncating anything already there
pub fn create_empty_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::File::create(path)
        .map(drop)
        .map_err(|e| AppDbError::io(path, e))
}
