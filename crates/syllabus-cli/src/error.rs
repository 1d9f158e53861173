//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Curriculum or learned-state storage error
    #[error(transparent)]
    Store(#[from] syllabus_store::StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line editor error
    #[error("Editor error: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),

    /// Concept not present in the active grade
    #[error("Unknown concept '{concept}' in grade {grade}")]
    UnknownConcept {
        /// Requested concept name
        concept: String,
        /// Active grade
        grade: String,
    },

    /// No concept selected for an operation that needs one
    #[error("No concept selected. Click a concept or use 'select <name>' first.")]
    NoSelection,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
