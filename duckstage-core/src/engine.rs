//! The external query engine and the process gateway through which it
//! is invoked.
//!
//! The engine is an opaque collaborator: this crate never parses files
//! or executes SQL itself, it only composes subprocess invocations. The
//! [`ProcessGateway`] trait is the seam that keeps both invocation
//! shapes mockable in tests without a real binary on the search path.

use std::env;
use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::debug;

use crate::error::MissingDependency;

/// Name of the engine binary looked up on the search path.
pub const ENGINE_BINARY: &str = "duckdb";

/// Subprocess seam for the two ways the engine is invoked.
///
/// Both operations run the engine to completion and report its exit
/// status; neither imposes a timeout. Cancellation is left to operating
/// system signal delivery to the child.
pub trait ProcessGateway {
    /// Runs the engine once with `args` and waits for it to exit.
    fn run_once(&self, args: &[OsString]) -> impl Future<Output = io::Result<ExitStatus>>;

    /// Runs the engine as a foreground interactive process, standard
    /// streams inherited from the parent, and waits for it to exit.
    fn run_interactive(&self, args: &[OsString]) -> impl Future<Output = io::Result<ExitStatus>>;
}

/// The DuckDB command-line binary, located on the search path at startup.
#[derive(Debug, Clone)]
pub struct DuckDbCli {
    binary: PathBuf,
}

impl DuckDbCli {
    /// Locates the engine binary on `PATH`.
    ///
    /// # Errors
    /// Returns [`MissingDependency`] when no executable candidate is
    /// found; callers treat this as a fatal startup error before any
    /// other logic runs.
    pub fn locate() -> Result<Self, MissingDependency> {
        let path_var = env::var_os("PATH").unwrap_or_default();
        Self::locate_in(ENGINE_BINARY, &path_var)
    }

    fn locate_in(binary: &str, path_var: &OsStr) -> Result<Self, MissingDependency> {
        for dir in env::split_paths(path_var) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            let candidate = dir.join(binary);
            if is_executable(&candidate) {
                debug!(binary = %candidate.display(), "engine binary located");
                return Ok(Self { binary: candidate });
            }
        }
        Err(MissingDependency {
            binary: binary.to_owned(),
        })
    }

    /// Resolved path of the engine binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl ProcessGateway for DuckDbCli {
    // Standard streams are inherited by default for both invocation
    // shapes, so load-time diagnostics from the engine reach the user's
    // terminal directly.
    async fn run_once(&self, args: &[OsString]) -> io::Result<ExitStatus> {
        Command::new(&self.binary).args(args).status().await
    }

    async fn run_interactive(&self, args: &[OsString]) -> io::Result<ExitStatus> {
        Command::new(&self.binary).args(args).status().await
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
