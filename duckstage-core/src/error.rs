//! Error types for the duckstage core library.
//!
//! Every error here is terminal for a run: the pipeline performs no local
//! recovery or retries, so each variant maps to a single user-visible
//! message and a non-zero exit.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The input path carries an extension outside the recognised set.
#[derive(Debug, Error)]
#[error("unsupported file format for `{path}`; expected .parquet, .csv, or .csv.gz")]
pub struct UnsupportedFormat {
    /// Path whose extension could not be mapped to a format.
    pub path: PathBuf,
}

/// Errors raised while resolving an input path or pattern to concrete files.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The glob pattern itself was syntactically invalid.
    #[error("invalid file pattern `{pattern}`: {source}")]
    BadPattern {
        /// Pattern supplied by the user.
        pattern: String,
        /// Underlying pattern parse failure.
        #[source]
        source: glob::PatternError,
    },
    /// A syntactically valid pattern expanded to zero files.
    #[error("no files matched pattern `{pattern}`")]
    NoMatch {
        /// Pattern supplied by the user.
        pattern: String,
    },
    /// A literal (non-glob) input path does not exist on disk.
    #[error("file does not exist: `{path}`")]
    NotFound {
        /// Path supplied by the user.
        path: PathBuf,
    },
}

/// Errors raised while managing the staging directory.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The staging directory could not be created.
    #[error("failed to create staging directory: {source}")]
    Create {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The staging directory could not be removed.
    #[error("failed to remove staging directory `{path}`: {source}")]
    Remove {
        /// Directory that resisted removal.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while materialising the staged table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The one-shot engine process could not be spawned.
    #[error("failed to run the load statement: {source}")]
    Spawn {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The one-shot engine process exited with a failure status.
    #[error("load statement failed with {status}")]
    Failed {
        /// Exit status reported by the engine.
        status: ExitStatus,
    },
}

/// Errors raised while running the interactive engine session.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The interactive engine process could not be spawned.
    #[error("failed to start the interactive shell: {source}")]
    Spawn {
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The interactive engine process exited with a failure status.
    #[error("interactive shell exited with {status}")]
    Failed {
        /// Exit status reported by the engine.
        status: ExitStatus,
    },
}

/// The external engine binary is absent from the search path.
#[derive(Debug, Error)]
#[error("`{binary}` not found on PATH; install DuckDB: https://duckdb.org/docs/installation/")]
pub struct MissingDependency {
    /// Name of the binary that was looked up.
    pub binary: String,
}

/// Signal-handler registration failed.
#[derive(Debug, Error)]
#[error("failed to register signal handlers: {source}")]
pub struct SignalError {
    /// Error raised by the runtime while installing the handlers.
    #[source]
    pub source: io::Error,
}
