//! Table materialisation and the interactive session.
//!
//! Both operations are one-shot subprocess invocations through the
//! process gateway: the first loads the resolved files into the staged
//! table, the second hands the terminal to the engine until the user
//! (or a signal) ends the session. A single failed attempt aborts the
//! whole run; malformed input should fail fast rather than mask errors.

use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, info};

use crate::engine::ProcessGateway;
use crate::error::{LaunchError, LoadError};
use crate::resolve::ResolvedFiles;
use crate::staging::StagingWorkspace;
use crate::statement::{LoadOptions, LoadStatement};

/// Flag instructing the engine to run a single command and exit.
const ONE_SHOT_FLAG: &str = "-c";

/// Builds the load statement for `files` and executes it once against
/// the workspace's database file.
///
/// # Errors
/// Returns [`LoadError::Spawn`] when the engine process cannot be
/// started and [`LoadError::Failed`] when it exits unsuccessfully.
/// There are no retries.
pub async fn materialize(
    gateway: &impl ProcessGateway,
    files: &ResolvedFiles,
    workspace: &StagingWorkspace,
    options: LoadOptions,
) -> Result<(), LoadError> {
    let statement = LoadStatement::build(files, options);
    let database = workspace.database_path();
    debug!(statement = statement.sql(), "materialising staged table");

    let args = [
        database.into_os_string(),
        OsString::from(ONE_SHOT_FLAG),
        OsString::from(statement.sql()),
    ];
    let status = gateway
        .run_once(&args)
        .await
        .map_err(|source| LoadError::Spawn { source })?;
    if !status.success() {
        return Err(LoadError::Failed { status });
    }
    Ok(())
}

/// Launches the engine interactively against `database` and waits for
/// the session to end.
///
/// # Errors
/// Returns [`LaunchError::Spawn`] when the engine process cannot be
/// started and [`LaunchError::Failed`] when the session exits
/// unsuccessfully.
pub async fn launch_shell(
    gateway: &impl ProcessGateway,
    database: &Path,
) -> Result<(), LaunchError> {
    info!(database = %database.display(), "starting interactive session");
    let args = [database.as_os_str().to_os_string()];
    let status = gateway
        .run_interactive(&args)
        .await
        .map_err(|source| LaunchError::Spawn { source })?;
    if !status.success() {
        return Err(LaunchError::Failed { status });
    }
    Ok(())
}
