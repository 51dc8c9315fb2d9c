//! Atomic replacement of the backing record
//!
//! The new contents go to a temporary file in the same directory, are synced,
//! and are renamed over the record. Readers observe either the old or the new
//! record, never a partial write.

use log::debug;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::store::record::{self, UserRecord};

/// Replaces the backing record at `path` with `users`.
///
/// On error the previous record is left untouched and the temporary file
/// is removed.
pub(crate) fn write_users(path: &Path, users: &[UserRecord]) -> Result<(), StoreError> {
    let bytes = record::encode(path, users)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    temp.write_all(&bytes)
        .map_err(|e| StoreError::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    debug!("Wrote {} user(s) to {}", users.len(), path.display());
    Ok(())
}
