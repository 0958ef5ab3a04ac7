//! CLI entry point for staging tabular files into an interactive DuckDB
//! session.
//!
//! Verifies the engine dependency, parses arguments with clap, installs
//! the signal listener, executes the staging pipeline, and maps the
//! outcome to an exit code: `0` on success, `1` on any fatal error, and
//! `128 + signal` when termination was signal-driven (after cleanup).

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use duckstage_cli::{
    cli::{Cli, render_summary, run_cli},
    logging::{self, LoggingError},
};
use duckstage_core::{DuckDbCli, SignalController};
use tracing::{error, info};

async fn try_main(engine: &DuckDbCli, cli: Cli) -> Result<()> {
    let summary = run_cli(engine, cli).await.context("failed to stage input")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    // The engine must be present before anything else runs, including
    // argument parsing.
    let engine = match DuckDbCli::locate() {
        Ok(engine) => engine,
        Err(err) => {
            error!(error = %err, "startup dependency missing");
            return ExitCode::FAILURE;
        }
    };

    let cli = Cli::parse();

    let signals = match SignalController::install() {
        Ok(controller) => controller,
        Err(err) => {
            error!(error = %err, "failed to install signal handling");
            return ExitCode::FAILURE;
        }
    };
    let state = signals.state();

    let code = match try_main(&engine, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Alternate formatting keeps the whole context chain in the
            // single user-visible message.
            let message = format!("{err:#}");
            error!(error = %message, "command execution failed");
            ExitCode::FAILURE
        }
    };

    // Cleanup has already run by this point; a recorded signal takes
    // precedence over the pipeline result.
    if let Some(signal_code) = state.exit_code() {
        info!(code = signal_code, "terminated by signal");
        return ExitCode::from(signal_code);
    }
    code
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
