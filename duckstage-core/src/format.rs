//! Input format detection.
//!
//! A format is derived once from the input path's extension and is
//! immutable afterwards. Detection is deliberately extension-only: a
//! `.gz` suffix is taken to mean gzip-compressed CSV without sniffing
//! the content, matching the engine's own handling of compressed input.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use crate::error::UnsupportedFormat;

/// Data formats the staging pipeline can hand to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Columnar Parquet data; inputs may be glob patterns over many files.
    Parquet,
    /// Delimited text (CSV), optionally gzip-compressed; single literal path.
    Csv,
}

impl FileFormat {
    /// Detects the format of `path` from its extension, case-insensitively.
    ///
    /// # Errors
    /// Returns [`UnsupportedFormat`] when the extension is missing or
    /// outside the recognised set; callers must treat that as fatal
    /// rather than assuming a default.
    pub fn detect(path: &Path) -> Result<Self, UnsupportedFormat> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("parquet") => Ok(Self::Parquet),
            Some("csv" | "gz") => Ok(Self::Csv),
            _ => Err(UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Stable lower-case name used in log events and messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
