//! Input resolution: from a user-supplied path or pattern to a verified,
//! deterministically ordered set of files.
//!
//! Parquet inputs are glob patterns and may match many files; CSV inputs
//! are literal paths that must exist exactly as given. Resolution never
//! produces an empty set — it fails instead.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ResolveError;
use crate::format::FileFormat;

/// A non-empty, ordered set of verified input files and the format they
/// were resolved under.
#[derive(Debug, Clone)]
pub struct ResolvedFiles {
    format: FileFormat,
    paths: Vec<PathBuf>,
}

impl ResolvedFiles {
    /// Resolves `input` according to `format`.
    ///
    /// Glob-capable formats expand the pattern and keep regular-file
    /// matches, sorted by path so the outcome is stable for a fixed
    /// filesystem state. Other formats take the path literally.
    ///
    /// # Errors
    /// Returns [`ResolveError::BadPattern`] for invalid pattern syntax,
    /// [`ResolveError::NoMatch`] when a pattern expands to nothing, and
    /// [`ResolveError::NotFound`] when a literal path does not exist.
    pub fn resolve(input: &str, format: FileFormat) -> Result<Self, ResolveError> {
        let paths = match format {
            FileFormat::Parquet => expand_pattern(input)?,
            FileFormat::Csv => resolve_literal(input)?,
        };
        debug!(format = %format, files = paths.len(), "resolution complete");
        Ok(Self { format, paths })
    }

    /// Format the set was resolved under.
    pub const fn format(&self) -> FileFormat {
        self.format
    }

    /// Resolved paths, in the order they will be handed to the engine.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Renders the set as a comma-joined list of single-quoted paths,
    /// ready for interpolation into a load statement. Embedded single
    /// quotes are doubled so unusual file names survive the round trip.
    pub fn sql_list(&self) -> String {
        self.paths
            .iter()
            .map(|path| sql_quote(path))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[cfg(test)]
    pub(crate) fn from_parts(format: FileFormat, paths: Vec<PathBuf>) -> Self {
        Self { format, paths }
    }
}

fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, ResolveError> {
    let entries = glob::glob(pattern).map_err(|source| ResolveError::BadPattern {
        pattern: pattern.to_owned(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(path) => debug!(path = %path.display(), "skipping non-file match"),
            Err(err) => warn!(error = %err, "skipping unreadable path during expansion"),
        }
    }

    if paths.is_empty() {
        return Err(ResolveError::NoMatch {
            pattern: pattern.to_owned(),
        });
    }

    paths.sort();
    Ok(paths)
}

fn resolve_literal(input: &str) -> Result<Vec<PathBuf>, ResolveError> {
    let path = PathBuf::from(input);
    if !path.exists() {
        return Err(ResolveError::NotFound { path });
    }
    Ok(vec![path])
}

fn sql_quote(path: &Path) -> String {
    let raw = path.display().to_string().replace('\'', "''");
    format!("'{raw}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;
    use std::io::{self, Write};

    use rstest::rstest;
    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        match TempDir::new() {
            Ok(dir) => dir,
            Err(err) => panic!("failed to create temp dir: {err}"),
        }
    }

    fn create_file(dir: &TempDir, name: &str) -> io::Result<PathBuf> {
        let path = dir.path().join(name);
        let mut file = File::create(&path)?;
        file.write_all(b"x")?;
        Ok(path)
    }

    fn resolve_expecting_error(input: &str, format: FileFormat, panic_msg: &str) -> ResolveError {
        match ResolvedFiles::resolve(input, format) {
            Ok(_) => panic!("{panic_msg}"),
            Err(err) => err,
        }
    }

    #[rstest]
    fn pattern_returns_matches_sorted() -> io::Result<()> {
        let dir = temp_dir();
        let second = create_file(&dir, "part-1.parquet")?;
        let first = create_file(&dir, "part-0.parquet")?;
        create_file(&dir, "notes.txt")?;
        let pattern = dir.path().join("*.parquet").display().to_string();

        let files = match ResolvedFiles::resolve(&pattern, FileFormat::Parquet) {
            Ok(files) => files,
            Err(err) => panic!("pattern must resolve: {err}"),
        };
        assert_eq!(files.paths(), [first, second]);
        assert_eq!(files.format(), FileFormat::Parquet);
        Ok(())
    }

    #[rstest]
    fn pattern_ignores_matching_directories() -> io::Result<()> {
        let dir = temp_dir();
        std::fs::create_dir(dir.path().join("subdir.parquet"))?;
        let file = create_file(&dir, "data.parquet")?;
        let pattern = dir.path().join("*.parquet").display().to_string();

        let files = match ResolvedFiles::resolve(&pattern, FileFormat::Parquet) {
            Ok(files) => files,
            Err(err) => panic!("pattern must resolve: {err}"),
        };
        assert_eq!(files.paths(), [file]);
        Ok(())
    }

    #[rstest]
    fn pattern_with_no_matches_fails() {
        let dir = temp_dir();
        let pattern = dir.path().join("*.parquet").display().to_string();
        let err = resolve_expecting_error(&pattern, FileFormat::Parquet, "empty match must fail");
        assert!(matches!(err, ResolveError::NoMatch { .. }));
    }

    #[rstest]
    fn invalid_pattern_fails() {
        let err =
            resolve_expecting_error("data[.parquet", FileFormat::Parquet, "bad pattern must fail");
        assert!(matches!(err, ResolveError::BadPattern { .. }));
    }

    #[rstest]
    fn literal_path_must_exist() -> io::Result<()> {
        let dir = temp_dir();
        let path = create_file(&dir, "data.csv")?;

        let files = match ResolvedFiles::resolve(&path.display().to_string(), FileFormat::Csv) {
            Ok(files) => files,
            Err(err) => panic!("existing file must resolve: {err}"),
        };
        assert_eq!(files.paths(), [path]);
        Ok(())
    }

    #[rstest]
    fn missing_literal_path_fails() {
        let dir = temp_dir();
        let missing = dir.path().join("missing.csv").display().to_string();
        let err = resolve_expecting_error(&missing, FileFormat::Csv, "missing file must fail");
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[rstest]
    fn literal_path_is_not_expanded() {
        // A glob metacharacter in a CSV path is taken literally; the file
        // does not exist under that literal name, so resolution fails.
        let dir = temp_dir();
        if create_file(&dir, "a.csv").is_err() {
            panic!("fixture file must be created");
        }
        let pattern = dir.path().join("*.csv").display().to_string();
        let err = resolve_expecting_error(&pattern, FileFormat::Csv, "literal must not expand");
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[rstest]
    fn sql_list_quotes_each_path() -> io::Result<()> {
        let dir = temp_dir();
        let path = create_file(&dir, "my data.csv")?;

        let files = match ResolvedFiles::resolve(&path.display().to_string(), FileFormat::Csv) {
            Ok(files) => files,
            Err(err) => panic!("existing file must resolve: {err}"),
        };
        assert_eq!(files.sql_list(), format!("'{}'", path.display()));
        Ok(())
    }

    #[rstest]
    fn sql_list_doubles_embedded_quotes() {
        let files = ResolvedFiles::from_parts(
            FileFormat::Csv,
            vec![PathBuf::from("it's data.csv")],
        );
        assert_eq!(files.sql_list(), "'it''s data.csv'");
    }

    #[rstest]
    fn sql_list_joins_in_resolution_order() {
        let files = ResolvedFiles::from_parts(
            FileFormat::Parquet,
            vec![PathBuf::from("a.parquet"), PathBuf::from("b.parquet")],
        );
        assert_eq!(files.sql_list(), "'a.parquet','b.parquet'");
    }
}
