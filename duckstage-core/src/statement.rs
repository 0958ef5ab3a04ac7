//! Load-statement construction.
//!
//! Exactly one statement is built per run: it creates the fixed staging
//! table from the resolved input files using the engine's
//! format-specific reader function. The statement is executed once and
//! not retained.

use crate::format::FileFormat;
use crate::resolve::ResolvedFiles;

/// Name of the staged table exposed to the interactive session. One
/// table ever exists per run, so the name is not user-configurable.
pub const TABLE_NAME: &str = "p";

/// Options applied while loading the input into the staged table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Reject malformed rows instead of tolerating them. Only
    /// meaningful for delimited text; ignored for columnar input.
    pub strict: bool,
}

/// A single SQL statement that materialises the staged table.
#[derive(Debug, Clone)]
pub struct LoadStatement {
    sql: String,
}

impl LoadStatement {
    /// Builds the statement for `files`, honouring `options` where the
    /// format supports them.
    pub fn build(files: &ResolvedFiles, options: LoadOptions) -> Self {
        let sql = match files.format() {
            FileFormat::Parquet => format!(
                "CREATE TABLE {TABLE_NAME} AS SELECT * FROM read_parquet([{}]);",
                files.sql_list()
            ),
            FileFormat::Csv => format!(
                "CREATE TABLE {TABLE_NAME} AS SELECT * FROM read_csv({}, strict_mode={});",
                files.sql_list(),
                options.strict
            ),
        };
        Self { sql }
    }

    /// The statement text handed to the engine.
    pub fn sql(&self) -> &str {
        &self.sql
    }
}
