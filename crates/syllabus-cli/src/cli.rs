//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use syllabus_llm::AssistantTask;

/// Syllabus - Explore a science curriculum as a concept graph and track what you have learned.
#[derive(Debug, Parser)]
#[command(name = "syllabus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SYLLABUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Grade to use
    #[arg(short, long, global = true)]
    pub grade: Option<String>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the concept graph of the grade
    Graph,

    /// Show the detail panel of a concept
    Show(ShowArgs),

    /// Apply a raw click payload from the graph widget
    Click(ClickArgs),

    /// Mark a concept as learned (or unlearned with --undo)
    Learn(LearnArgs),

    /// Show per-domain progress
    Progress,

    /// Report activities and interconnections that point nowhere
    Check,

    /// Ask the AI assistant about a concept
    Ask(AskArgs),

    /// List configured grades
    Grades,

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Concept name
    pub concept: String,
}

/// Arguments for the click command.
#[derive(Debug, Parser)]
pub struct ClickArgs {
    /// Click payload: JSON (e.g. '{"nodes":["concept::Friction"]}') or a bare node id
    pub payload: String,
}

/// Arguments for the learn command.
#[derive(Debug, Parser)]
pub struct LearnArgs {
    /// Concept name
    pub concept: String,

    /// Remove the concept from the learned set instead
    #[arg(long)]
    pub undo: bool,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Assistant task
    #[arg(value_enum)]
    pub task: TaskArg,

    /// Concept name
    pub concept: Option<String>,
}

/// Assistant task argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TaskArg {
    /// Explain the concept simply
    Explain,
    /// Relate it to its neighbours
    Connect,
    /// Generate a short quiz
    Quiz,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<TaskArg> for AssistantTask {
    fn from(task: TaskArg) -> Self {
        match task {
            TaskArg::Explain => AssistantTask::Explain,
            TaskArg::Connect => AssistantTask::Connect,
            TaskArg::Quiz => AssistantTask::Quiz,
        }
    }
}
