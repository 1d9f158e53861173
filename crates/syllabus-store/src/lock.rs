//! Exclusive lock file guarding a read-modify-write cycle
//!
//! The lock is a sibling file created with `create_new`, which fails if the
//! file already exists. The guard removes it on drop. A lock file older than
//! [`STALE_LOCK_AGE`] is assumed to be left over from a crashed process and
//! is broken. Breaking happens under a second `<file>.lock.break` sentinel
//! and staleness is checked again while it is held, so a lock that another
//! waiter has just broken and re-acquired is never removed.

use crate::{Result, StoreError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default time to wait for a contended lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Lock files older than this are broken
pub const STALE_LOCK_AGE: Duration = Duration::from_secs(30);

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Held exclusive lock; released on drop
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
}

impl FileLock {
    /// Lock file path used for `target`
    pub fn lock_path(target: &Path) -> PathBuf {
        let mut name = target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        target.with_file_name(name)
    }

    /// Acquire the lock for `target`, waiting up to `timeout`
    ///
    /// # Errors
    /// Returns `LockTimeout` if another holder keeps the lock for longer
    /// than `timeout`, or `Io` if the lock file cannot be created.
    pub fn acquire(target: &Path, timeout: Duration) -> Result<Self> {
        let path = Self::lock_path(target);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let start = Instant::now();
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    // Holder pid is informational only
                    let _ = writeln!(file, "{}", std::process::id());
                    debug!("Acquired lock {}", path.display());
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if Self::break_if_stale(&path) {
                        continue;
                    }
                    if start.elapsed() >= timeout {
                        return Err(StoreError::LockTimeout(path));
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Err(e) => return Err(StoreError::Io(e)),
            }
        }
    }

    /// Path of the held lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn breaker_path(lock: &Path) -> PathBuf {
        let mut name = lock.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".break");
        lock.with_file_name(name)
    }

    /// Remove `lock` if it is stale; true when it was removed
    fn break_if_stale(lock: &Path) -> bool {
        if !Self::is_stale(lock) {
            return false;
        }
        let breaker = Self::breaker_path(lock);
        match OpenOptions::new().write(true).create_new(true).open(&breaker) {
            Ok(_) => {
                let broken = Self::is_stale(lock) && fs::remove_file(lock).is_ok();
                if broken {
                    warn!("Broke stale lock {}", lock.display());
                }
                if let Err(e) = fs::remove_file(&breaker) {
                    warn!("Failed to remove {}: {}", breaker.display(), e);
                }
                broken
            }
            Err(_) => {
                // A breaker that crashed mid-break leaves its sentinel behind
                if Self::is_stale(&breaker) {
                    let _ = fs::remove_file(&breaker);
                }
                false
            }
        }
    }

    fn is_stale(path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age > STALE_LOCK_AGE)
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to release lock {}: {}", self.path.display(), e);
        }
    }
}
