//! Command-line interface orchestration for duckstage.
//!
//! Parses the single-input surface, wires the core components together
//! (detect → resolve → stage → materialise → interactive session →
//! cleanup), and aggregates the core error taxonomy for the binary.

mod commands;

pub use commands::{Cli, CliError, SessionSummary, render_summary, run_cli};
