//! Syllabus CLI library.
//!
//! Configuration, the session [`Dashboard`], command execution, the REPL
//! and output formatting for the `syllabus` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use dashboard::{AssistantReply, ConceptDetail, Dashboard, RenderInput, SessionState};
pub use error::{CliError, Result};
pub use output::Formatter;
