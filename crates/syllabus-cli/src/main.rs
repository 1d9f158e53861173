//! Syllabus CLI - explore a curriculum graph and track learned concepts.

use clap::Parser;
use syllabus_cli::commands;
use syllabus_cli::repl;
use syllabus_cli::{Cli, Command, Config, Dashboard, Formatter};
use syllabus_llm::AnyProvider;
use syllabus_store::{CurriculumLibrary, LearnedFileStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `SYLLABUS_LOG` or `RUST_LOG` pick the filter, `--verbose` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SYLLABUS_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> syllabus_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    if cli.config.is_none() && !Config::path()?.exists() {
        match config.save() {
            Ok(()) => info!("Wrote default config to {}", Config::path()?.display()),
            Err(e) => warn!("Could not write default config: {}", e),
        }
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let library = CurriculumLibrary::load(&config.curriculum_source());
    let store = LearnedFileStore::new(&config.learned_file);
    let grade = cli.grade.as_deref().or(config.active_grade.as_deref());
    let mut dashboard = Dashboard::new(library, store, grade)?;

    let output = match cli.command {
        None | Some(Command::Repl) => {
            let assistant = AnyProvider::from_config(&config.assistant);
            return repl::run_repl(
                &mut dashboard,
                &assistant,
                &formatter,
                config.settings.history_size,
            );
        }
        Some(Command::Graph) => commands::execute_graph(&dashboard, &formatter)?,
        Some(Command::Show(args)) => {
            commands::execute_show(Some(args.concept.as_str()), &mut dashboard, &formatter)?
        }
        Some(Command::Click(args)) => {
            commands::execute_click(&args.payload, &mut dashboard, &formatter)?
        }
        Some(Command::Learn(args)) => {
            commands::execute_learn(Some(args.concept.as_str()), !args.undo, &mut dashboard, &formatter)?
        }
        Some(Command::Progress) => commands::execute_progress(&dashboard, &formatter)?,
        Some(Command::Check) => commands::execute_check(&dashboard, &formatter)?,
        Some(Command::Grades) => commands::execute_grades(&dashboard, &formatter)?,
        Some(Command::Ask(args)) => {
            let assistant = AnyProvider::from_config(&config.assistant);
            commands::execute_ask(
                args.task.into(),
                args.concept.as_deref(),
                &mut dashboard,
                &assistant,
                &formatter,
            )?
        }
    };

    println!("{}", output);
    Ok(())
}
