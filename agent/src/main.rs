//! Long-running agent scaffold.
//!
//! Loads optional JSON configuration, initializes the rotating log file under
//! the user cache directory, then runs the agent action once (`run`) or on a
//! fixed delay until stopped (`loop`).

use std::io::Stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use launch_agent::error::AgentError;
use launch_agent::exit_codes;
use launch_agent::io::config::AgentSettings;
use launch_agent::io::line_logger::RotatingLineLogger;
use launch_agent::logging;
use launch_agent::looping::{StopSignal, log_tick, run_loop};
use launch_agent::run::run_once;
use launch_agent::start::{Started, start_agent};

#[derive(Parser)]
#[command(
    name = "launch-agent",
    version,
    about = "Minimal long-running agent with a rotating log file"
)]
struct Cli {
    /// JSON configuration file. Must exist when given; defaults to
    /// `launch-agent.json` beside the executable if present.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug diagnostics on stderr (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run once and exit.
    Run,
    /// Start looping; runs until Ctrl+C or `loop.max_iterations`.
    Loop,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let Started {
        settings,
        mut logger,
        ..
    } = start_agent(cli.config.as_deref())?;
    match cli.command {
        Command::Run => run_once(&mut logger),
        Command::Loop => cmd_loop(&mut logger, &settings),
    }
}

fn cmd_loop(logger: &mut RotatingLineLogger<Stdout>, settings: &AgentSettings) -> Result<()> {
    let schedule = settings.loop_schedule();
    let (handle, signal) = StopSignal::pair();
    let for_handler = handle.clone();
    if let Err(err) = ctrlc::set_handler(move || for_handler.stop()) {
        warn!(error = %err, "stop handler not installed; loop runs until killed");
    }

    let outcome = run_loop(logger, &schedule, &signal, |logger| log_tick(logger, &schedule))?;
    info!(iterations = outcome.iterations, stop = ?outcome.stop, "loop finished");
    drop(handle);
    Ok(())
}

/// Map the root failure to a stable exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AgentError>() {
        Some(AgentError::Configuration { .. }) => exit_codes::CONFIGURATION_ERROR,
        Some(AgentError::Io { .. } | AgentError::System { .. }) | None => exit_codes::IO_ERROR,
    }
}
