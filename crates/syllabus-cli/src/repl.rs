//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL is the interactive session: the selection and the active grade
//! live across commands, and every command re-renders from that state.

use crate::commands;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use syllabus_domain::selection::SelectionChange;
use syllabus_domain::traits::LearnedStore;
use syllabus_llm::{AnyProvider, AssistantTask, LlmError};
use syllabus_store::StoreError;
use tracing::debug;

/// REPL command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Print help
    Help,
    /// List grades, or switch to one
    Grade(Option<String>),
    /// Apply a raw click payload
    Click(String),
    /// Select a concept by name
    Select(String),
    /// Show the selected concept
    Show,
    /// Mark a concept (or the selection) learned
    Learn(Option<String>),
    /// Unmark a concept (or the selection)
    Unlearn(Option<String>),
    /// Per-domain progress
    Progress,
    /// Data-quality check
    Check,
    /// Ask the assistant about the selection
    Ask(AssistantTask),
    /// Graph summary
    Graph,
}

/// Run the interactive REPL.
pub fn run_repl<S>(
    dashboard: &mut Dashboard<S>,
    assistant: &std::result::Result<AnyProvider, LlmError>,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()>
where
    S: LearnedStore<Error = StoreError>,
{
    println!(
        "{}",
        formatter.info("Syllabus REPL - Type 'help' for commands, 'exit' to quit")
    );
    if let Some(warning) = commands::load_warning(dashboard, formatter) {
        println!("{}", warning);
    }
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = history_path()?;
    if editor.load_history(&history_path).is_err() {
        debug!("No history at {}", history_path.display());
    }

    loop {
        let prompt = match dashboard.selected() {
            Some(name) => format!("syllabus[{}:{}]> ", dashboard.grade(), name),
            None => format!("syllabus[{}]> ", dashboard.grade()),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(cmd) => match execute_repl_command(cmd, dashboard, assistant, formatter) {
                        Ok(out) => println!("{}", out),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();
    Ok(())
}

/// Parse a REPL command line.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match head {
        "" => Err(CliError::InvalidInput("Empty command".to_string())),
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "grade" | "grades" => Ok(ReplCommand::Grade(arg)),
        "click" => arg
            .map(ReplCommand::Click)
            .ok_or_else(|| usage("click <json payload | node id>")),
        "select" => arg
            .map(ReplCommand::Select)
            .ok_or_else(|| usage("select <concept name>")),
        "show" => match arg {
            Some(name) => Ok(ReplCommand::Select(name)),
            None => Ok(ReplCommand::Show),
        },
        "learn" => Ok(ReplCommand::Learn(arg)),
        "unlearn" => Ok(ReplCommand::Unlearn(arg)),
        "progress" => Ok(ReplCommand::Progress),
        "check" => Ok(ReplCommand::Check),
        "graph" => Ok(ReplCommand::Graph),
        "ask" => {
            let task = arg.ok_or_else(|| usage("ask <explain|connect|quiz>"))?;
            task.parse::<AssistantTask>()
                .map(ReplCommand::Ask)
                .map_err(CliError::InvalidInput)
        }
        other => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            other
        ))),
    }
}

/// Execute a REPL command and return the text to print.
pub fn execute_repl_command<S>(
    cmd: ReplCommand,
    dashboard: &mut Dashboard<S>,
    assistant: &std::result::Result<AnyProvider, LlmError>,
    formatter: &Formatter,
) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    match cmd {
        ReplCommand::Exit | ReplCommand::Help => Ok(String::new()),
        ReplCommand::Grade(None) => commands::execute_grades(dashboard, formatter),
        ReplCommand::Grade(Some(grade)) => {
            let change = dashboard.switch_grade(&grade)?;
            let mut out = formatter.success(&format!("Switched to grade {}", grade));
            if change == SelectionChange::Cleared {
                out.push('\n');
                out.push_str(&formatter.info("Selection cleared: concept not in this grade"));
            }
            if let Some(warning) = commands::load_warning(dashboard, formatter) {
                out.push('\n');
                out.push_str(&warning);
            }
            Ok(out)
        }
        ReplCommand::Click(payload) => commands::execute_click(&payload, dashboard, formatter),
        ReplCommand::Select(name) => commands::execute_show(Some(name.as_str()), dashboard, formatter),
        ReplCommand::Show => commands::execute_show(None, dashboard, formatter),
        ReplCommand::Learn(name) => {
            commands::execute_learn(name.as_deref(), true, dashboard, formatter)
        }
        ReplCommand::Unlearn(name) => {
            commands::execute_learn(name.as_deref(), false, dashboard, formatter)
        }
        ReplCommand::Progress => commands::execute_progress(dashboard, formatter),
        ReplCommand::Check => commands::execute_check(dashboard, formatter),
        ReplCommand::Graph => commands::execute_graph(dashboard, formatter),
        ReplCommand::Ask(task) => commands::execute_ask(task, None, dashboard, assistant, formatter),
    }
}

fn usage(text: &str) -> CliError {
    CliError::InvalidInput(format!("Usage: {}", text))
}

fn history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  grade [id]                     - List grades, or switch to one");
    println!("  click <payload>                - Apply a graph click (JSON or node id)");
    println!("  select <concept>               - Select a concept by name");
    println!("  show [concept]                 - Show the selected concept");
    println!("  learn [concept]                - Mark as learned (default: selection)");
    println!("  unlearn [concept]              - Mark as not learned");
    println!("  progress                       - Per-domain progress");
    println!("  check                          - Report unlinked activities");
    println!("  ask <explain|connect|quiz>     - Ask the assistant about the selection");
    println!("  graph                          - Graph summary (use -f json for the payload)");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
