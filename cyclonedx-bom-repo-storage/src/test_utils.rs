#![allow(clippy::unwrap_used)]
//! Test utilities for users of the storage crate.

use tempfile::{tempdir, TempDir};

use crate::repository::{Repository, RepositoryConfig};

/// Returns a [`Repository`] over a fresh temporary directory, plus the
/// `TempDir` handle that keeps the directory alive. The caller should hold
/// on to the handle for as long as the repository is in use; dropping it
/// deletes the directory.
pub fn get_test_repository() -> (Repository, TempDir) {
    let dir = tempdir().unwrap();
    let repository = Repository::open(RepositoryConfig {
        directory: dir.path().to_path_buf(),
    })
    .unwrap();
    (repository, dir)
}
