//! Core orchestration library for duckstage.
//!
//! Stages a Parquet or CSV input into a temporary DuckDB database and
//! hands control to the engine's interactive shell. The engine itself
//! is an external collaborator invoked over the command line; this
//! crate owns format detection, input resolution, the staging
//! workspace's lifecycle, load-statement construction, subprocess
//! composition, and signal-aware cleanup.

mod engine;
mod error;
mod format;
mod resolve;
mod session;
mod signal;
mod staging;
mod statement;

pub use crate::{
    engine::{DuckDbCli, ENGINE_BINARY, ProcessGateway},
    error::{
        LaunchError, LoadError, MissingDependency, ResolveError, SignalError, StagingError,
        UnsupportedFormat,
    },
    format::FileFormat,
    resolve::ResolvedFiles,
    session::{launch_shell, materialize},
    signal::{SignalController, SignalState},
    staging::{DB_FILE_NAME, StagingWorkspace},
    statement::{LoadOptions, LoadStatement, TABLE_NAME},
};
