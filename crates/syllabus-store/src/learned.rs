//! Learned-set persistence

use crate::lock::{FileLock, DEFAULT_LOCK_TIMEOUT};
use crate::{Result, StoreError};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use syllabus_domain::traits::LearnedStore;
use syllabus_domain::LearnedSet;
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

/// On-disk shape: `{ grade: { domain: [concept, ...] } }`
type LearnedDocument = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Learned-set stored in a single JSON file
///
/// Each mutation acquires an exclusive lock, re-reads the file, applies the
/// change, and replaces the file via temp-file-then-rename, so concurrent
/// sessions never lose each other's updates and a crash never leaves a
/// half-written document.
#[derive(Debug, Clone)]
pub struct LearnedFileStore {
    path: PathBuf,
    lock_timeout: Duration,
}

impl LearnedFileStore {
    /// Create a store for the file at `path` (created on first write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Set how long a writer waits for a contended lock
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<LearnedSet> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LearnedSet::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        if text.trim().is_empty() {
            return Ok(LearnedSet::new());
        }

        let document: LearnedDocument =
            serde_json::from_str(&text).map_err(|e| StoreError::CorruptState {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let grades = document
            .into_iter()
            .map(|(grade, domains)| {
                let domains = domains
                    .into_iter()
                    .map(|(domain, names)| (domain, names.into_iter().collect::<BTreeSet<_>>()))
                    .collect();
                (grade, domains)
            })
            .collect();
        Ok(LearnedSet::from_map(grades))
    }

    fn write(&self, set: &LearnedSet) -> Result<()> {
        let document: LearnedDocument = set
            .as_map()
            .iter()
            .map(|(grade, domains)| {
                let domains = domains
                    .iter()
                    .map(|(domain, names)| (domain.clone(), names.iter().cloned().collect()))
                    .collect();
                (grade.clone(), domains)
            })
            .collect();

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(write_failure)?;

        let temp = NamedTempFile::new_in(dir).map_err(write_failure)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &document)
                .map_err(|e| StoreError::PersistenceWriteFailure(e.to_string()))?;
            writer.flush().map_err(write_failure)?;
        }
        temp.as_file().sync_all().map_err(write_failure)?;
        temp.persist(&self.path)
            .map_err(|e| write_failure(e.error))?;
        Ok(())
    }
}

fn write_failure(e: std::io::Error) -> StoreError {
    StoreError::PersistenceWriteFailure(e.to_string())
}

impl LearnedStore for LearnedFileStore {
    type Error = StoreError;

    fn load(&self) -> Result<LearnedSet> {
        let set = self.read()?;
        debug!("Loaded learned state from {}", self.path.display());
        Ok(set)
    }

    fn mark_learned(
        &mut self,
        grade: &str,
        domain: &str,
        concept: &str,
        learned: bool,
    ) -> Result<bool> {
        let _lock = FileLock::acquire(&self.path, self.lock_timeout)?;

        // Re-read under the lock so writes from other sessions are kept
        let mut set = self.read()?;
        if !set.set_learned(grade, domain, concept, learned) {
            debug!("Learned state for '{}' already {}", concept, learned);
            return Ok(false);
        }

        if let Err(e) = self.write(&set) {
            error!("Saving learned state to {} failed: {}", self.path.display(), e);
            return Err(e);
        }
        info!(
            "Marked '{}' ({} / grade {}) as {}",
            concept,
            domain,
            grade,
            if learned { "learned" } else { "not learned" }
        );
        Ok(true)
    }
}

/// Learned-set held in memory only
///
/// Used for sessions that should not touch disk and for tests. Writes can be
/// made to fail to exercise the persistence-failure path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLearnedStore {
    set: LearnedSet,
    fail_writes: bool,
}

impl MemoryLearnedStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing learned-set
    pub fn with_set(set: LearnedSet) -> Self {
        Self {
            set,
            fail_writes: false,
        }
    }

    /// Make every changing write fail with `PersistenceWriteFailure`
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl LearnedStore for MemoryLearnedStore {
    type Error = StoreError;

    fn load(&self) -> Result<LearnedSet> {
        Ok(self.set.clone())
    }

    fn mark_learned(
        &mut self,
        grade: &str,
        domain: &str,
        concept: &str,
        learned: bool,
    ) -> Result<bool> {
        let mut next = self.set.clone();
        if !next.set_learned(grade, domain, concept, learned) {
            return Ok(false);
        }
        if self.fail_writes {
            return Err(StoreError::PersistenceWriteFailure(
                "memory store configured to fail".to_string(),
            ));
        }
        self.set = next;
        Ok(true)
    }
}
