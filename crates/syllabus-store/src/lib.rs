//! Syllabus Storage Layer
//!
//! Loads curriculum data and persists learned-state.
//!
//! # Architecture
//!
//! - JSON knowledge-base files, one per grade, loaded independently
//! - A single JSON learned-set document shaped `{ grade: { domain: [name] } }`
//! - Every learned-set mutation runs its read-modify-write cycle under an
//!   exclusive lock file and replaces the document with an atomic rename
//!
//! # Examples
//!
//! ```no_run
//! use syllabus_store::{CurriculumLibrary, JsonCurriculumSource};
//!
//! let source = JsonCurriculumSource::new()
//!     .with_grade("7", "data/grade7_knowledge_base.json")
//!     .with_grade("8", "data/grade8_knowledge_base.json");
//! let library = CurriculumLibrary::load(&source);
//! assert!(library.curriculum("7").is_some());
//! ```

#![warn(missing_docs)]

pub mod curriculum;
pub mod learned;
pub mod lock;

use std::path::PathBuf;
use thiserror::Error;

pub use curriculum::{parse_knowledge_base, CurriculumLibrary, JsonCurriculumSource};
pub use learned::{LearnedFileStore, MemoryLearnedStore};
pub use lock::FileLock;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file for a grade does not exist
    #[error("Data not found for grade {grade}: {}", .path.display())]
    DataNotFound {
        /// Grade identifier
        grade: String,
        /// Expected file location
        path: PathBuf,
    },

    /// Backing file is malformed or missing required fields
    #[error("Corrupt data for grade {grade}: {reason}")]
    DataCorrupt {
        /// Grade identifier
        grade: String,
        /// Parser or validation message
        reason: String,
    },

    /// Grade is not configured
    #[error("Unknown grade: {0}")]
    UnknownGrade(String),

    /// Persisted learned-set could not be parsed
    #[error("Corrupt learned state in {}: {reason}", .path.display())]
    CorruptState {
        /// Learned-set file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Learned-set could not be written
    #[error("Failed to save learned state: {0}")]
    PersistenceWriteFailure(String),

    /// Exclusive lock could not be acquired in time
    #[error("Timed out waiting for lock {}", .0.display())]
    LockTimeout(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
