//! Store locking
//!
//! Serializes writers of one backing record, across threads and processes,
//! with an OS-level exclusive lock (`flock` on Unix, `LockFileEx` on Windows)
//! on a sibling `.lock` file. The lock is released when the guard drops,
//! and by the OS if the process dies while holding it.

use fs2::FileExt;
use log::{debug, error};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Exclusive lock on a credential store, held until dropped.
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Blocks until the exclusive lock on `lock_path` is acquired.
    ///
    /// Creates the lock file, and its parent directory, if missing.
    pub fn acquire(lock_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
                debug!("Created store directory {}", parent.display());
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(lock_path)
            .map_err(|e| StoreError::io(lock_path, e))?;

        FileExt::lock_exclusive(&file).map_err(|e| StoreError::io(lock_path, e))?;
        debug!("Acquired store lock {}", lock_path.display());

        Ok(Self {
            file,
            path: lock_path.to_path_buf(),
        })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            error!("Failed to release store lock {}: {}", self.path.display(), e);
        } else {
            debug!("Released store lock {}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, mpsc};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_creates_lock_file_and_directory() {
        let temp = TempDir::new().unwrap();
        let lock_path = temp.path().join("nested").join("users.json.lock");

        let _lock = StoreLock::acquire(&lock_path).unwrap();
        assert!(lock_path.exists());
    }

    #[test]
    fn test_second_holder_waits_for_release() {
        let temp = TempDir::new().unwrap();
        let lock_path = temp.path().join("users.json.lock");
        let released = Arc::new(AtomicBool::new(false));

        let first = StoreLock::acquire(&lock_path).unwrap();
        let (tx, rx) = mpsc::channel();

        let waiter = {
            let lock_path = lock_path.clone();
            let released = Arc::clone(&released);
            thread::spawn(move || {
                let _second = StoreLock::acquire(&lock_path).unwrap();
                tx.send(released.load(Ordering::SeqCst)).unwrap();
            })
        };

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        released.store(true, Ordering::SeqCst);
        drop(first);

        assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
        waiter.join().unwrap();
    }
}
