//! Command implementation and argument parsing for the duckstage CLI.

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use duckstage_core::{
    DuckDbCli, FileFormat, LaunchError, LoadError, LoadOptions, ProcessGateway, ResolveError,
    ResolvedFiles, StagingError, StagingWorkspace, TABLE_NAME, UnsupportedFormat, launch_shell,
    materialize,
};

const EXAMPLES: &str = "Examples:
  duckstage data.parquet
  duckstage 'part-*.parquet'
  duckstage data.csv
  duckstage -s data.csv";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "duckstage",
    version,
    about = "Stage a Parquet or CSV file into DuckDB and open an interactive shell.",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// File path (CSV) or glob pattern (Parquet) to stage.
    pub input: String,

    /// Reject malformed rows instead of tolerating them (CSV only).
    #[arg(short = 's', long)]
    pub strict: bool,
}

/// Errors surfaced while executing the staging pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input extension is not a stageable format.
    #[error(transparent)]
    Format(#[from] UnsupportedFormat),
    /// Input resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The staging directory could not be created or removed.
    #[error(transparent)]
    Staging(#[from] StagingError),
    /// The staged table could not be materialised.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The interactive session could not be run to a clean exit.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Summarises a completed staging session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Format the input was staged as.
    pub format: FileFormat,
    /// Number of files loaded into the staged table.
    pub files_staged: usize,
}

/// Executes the staging pipeline represented by `cli` against the
/// located engine.
///
/// # Errors
/// Returns [`CliError`] when any pipeline stage fails; the staging
/// directory is removed regardless of where the failure occurred.
pub async fn run_cli(engine: &DuckDbCli, cli: Cli) -> Result<SessionSummary, CliError> {
    run_session(engine, &cli).await
}

#[instrument(
    name = "cli.session",
    err,
    skip(gateway, cli),
    fields(input = field::Empty, format = field::Empty),
)]
pub(super) async fn run_session(
    gateway: &impl ProcessGateway,
    cli: &Cli,
) -> Result<SessionSummary, CliError> {
    let span = Span::current();
    span.record("input", field::display(&cli.input));

    let format = FileFormat::detect(Path::new(&cli.input))?;
    span.record("format", field::display(format));

    let files = ResolvedFiles::resolve(&cli.input, format)?;
    info!(format = %format, files = files.paths().len(), "input resolved");

    // The workspace is dropped (and therefore removed) on every early
    // return below; the explicit destroy on the happy path surfaces
    // removal errors instead of swallowing them.
    let mut workspace = StagingWorkspace::create()?;
    info!(path = %workspace.path().display(), "staging directory created");

    materialize(gateway, &files, &workspace, LoadOptions { strict: cli.strict }).await?;
    info!(table = TABLE_NAME, "staged table created");

    launch_shell(gateway, &workspace.database_path()).await?;

    workspace.destroy()?;
    Ok(SessionSummary {
        format,
        files_staged: files.paths().len(),
    })
}

/// Renders `summary` to `writer` once the interactive session is over.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &SessionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "session closed; {} {} file(s) were staged as table `{}`",
        summary.files_staged, summary.format, TABLE_NAME
    )
}
