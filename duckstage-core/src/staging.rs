//! The ephemeral staging workspace.
//!
//! Each run owns exactly one uniquely named temporary directory holding
//! the generated database file. The directory is created before
//! materialisation and removed on every exit path: explicitly via
//! [`StagingWorkspace::destroy`] on the happy path, and through the
//! owned [`tempfile::TempDir`]'s drop behaviour on early error returns
//! and signal-driven unwinds.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};
use tracing::debug;

use crate::error::StagingError;

/// Prefix used for the staging directory name.
const STAGING_PREFIX: &str = "duckstage";

/// File name of the generated database inside the workspace.
pub const DB_FILE_NAME: &str = "tmp.duckdb";

/// A uniquely named temporary directory owning the run's database file.
#[derive(Debug)]
pub struct StagingWorkspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl StagingWorkspace {
    /// Creates a fresh workspace in the system temporary location.
    ///
    /// # Errors
    /// Returns [`StagingError::Create`] when the directory cannot be
    /// created (permissions, disk full, no writable temp location).
    pub fn create() -> Result<Self, StagingError> {
        let dir = Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir()
            .map_err(|source| StagingError::Create { source })?;
        let path = dir.path().to_path_buf();
        debug!(path = %path.display(), "staging workspace created");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    /// Directory owned by this workspace.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the generated database file inside the workspace.
    pub fn database_path(&self) -> PathBuf {
        self.path.join(DB_FILE_NAME)
    }

    /// Removes the workspace and everything inside it.
    ///
    /// Idempotent: the first call removes the tree, later calls are
    /// no-ops, and a directory that has already disappeared out from
    /// under us counts as success.
    ///
    /// # Errors
    /// Returns [`StagingError::Remove`] when removal fails for any
    /// reason other than the directory already being gone.
    pub fn destroy(&mut self) -> Result<(), StagingError> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        match dir.close() {
            Ok(()) => {
                debug!(path = %self.path.display(), "staging workspace removed");
                Ok(())
            }
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StagingError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_workspace() -> StagingWorkspace {
        match StagingWorkspace::create() {
            Ok(workspace) => workspace,
            Err(err) => panic!("workspace must be creatable: {err}"),
        }
    }

    #[test]
    fn create_then_destroy_leaves_nothing() {
        let mut workspace = create_workspace();
        let path = workspace.path().to_path_buf();
        assert!(path.is_dir());

        if let Err(err) = workspace.destroy() {
            panic!("destroy must succeed: {err}");
        }
        assert!(!path.exists());
    }

    #[test]
    fn destroy_twice_is_a_noop() {
        let mut workspace = create_workspace();
        if let Err(err) = workspace.destroy() {
            panic!("first destroy must succeed: {err}");
        }
        if let Err(err) = workspace.destroy() {
            panic!("second destroy must be a no-op: {err}");
        }
    }

    #[test]
    fn destroy_tolerates_externally_removed_directory() {
        let mut workspace = create_workspace();
        if let Err(err) = std::fs::remove_dir_all(workspace.path()) {
            panic!("external removal must succeed: {err}");
        }
        if let Err(err) = workspace.destroy() {
            panic!("already-gone directory must not be an error: {err}");
        }
    }

    #[test]
    fn drop_removes_the_directory() {
        let path = {
            let workspace = create_workspace();
            workspace.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn database_path_lives_inside_the_workspace() {
        let workspace = create_workspace();
        let database = workspace.database_path();
        assert_eq!(database.parent(), Some(workspace.path()));
        assert!(database.ends_with(DB_FILE_NAME));
    }
}
