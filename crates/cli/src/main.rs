use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::*;
use phony_core::project_manager::{ProjectManager, ProjectManagerConfig};
use phony_core::PhonyError;

mod commands;

/// Phony - A declarative task runner
#[derive(Parser)]
#[command(name = "phony")]
#[command(about = "Run a target and its prerequisites, stopping at the first failure")]
#[command(version)]
struct Cli {
    /// Target to run (defaults to the project's `default` target)
    target: Option<String>,

    /// Path to the project root (defaults to current directory)
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Config file to use instead of <DIRECTORY>/phony.yml
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Only show output of the commands themselves
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// List declared targets
    #[arg(long, group = "mode")]
    list: bool,

    /// Show what would run without running it
    #[arg(long, group = "mode")]
    dry_run: bool,

    /// Show the target dependency graph
    #[arg(long, group = "mode")]
    graph: bool,

    /// Check that every target resolves
    #[arg(long, group = "mode")]
    check: bool,

    /// Print the JSON schema of the config file
    #[arg(long, group = "mode")]
    schema: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.schema {
        return commands::schema::execute();
    }

    // Initialize project manager with all business logic
    let manager = ProjectManager::new(ProjectManagerConfig {
        root: cli.directory,
        config_file: cli.file,
    })?;

    // Execute command (CLI layer only handles presentation)
    let target = cli.target.as_deref();
    if cli.list {
        commands::list::execute(&manager)
    } else if cli.dry_run {
        commands::plan::execute(&manager, target)
    } else if cli.graph {
        commands::graph::execute(&manager)
    } else if cli.check {
        commands::check::execute(&manager)
    } else {
        commands::run::execute(&manager, target, cli.quiet).await
    }
}

/// Exit status for a failed invocation: the failing command's own code where there is one
fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<PhonyError>()
        .map(PhonyError::exit_code)
        .unwrap_or(1);
    u8::try_from(code).ok().filter(|&c| c != 0).unwrap_or(1)
}
