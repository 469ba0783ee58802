//! Locating the reference repository and its current commit.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Error;
use crate::ports::{FileSystem, GitRepo};

/// The checkout that annotations are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRepo {
    /// Directory of the checkout.
    pub path: PathBuf,
    /// HEAD commit, truncated to the configured length.
    pub commit: String,
}

impl ReferenceRepo {
    /// Locates the repository among `candidates` and reads its short hash.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoReferenceRepo`] or [`Error::NoCommit`].
    pub fn discover(
        fs: &dyn FileSystem,
        git: &dyn GitRepo,
        candidates: &[PathBuf],
        marker: &str,
        hash_len: usize,
    ) -> Result<Self, Error> {
        let path = locate(fs, candidates, marker)?;
        let commit = short_hash(git, &path, hash_len)?;
        info!(repo = %path.display(), %commit, "using reference repository");
        Ok(Self { path, commit })
    }

    /// Path of `file_path` inside the checkout.
    #[must_use]
    pub fn join(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }
}

/// Returns the first candidate directory containing `marker`.
///
/// # Errors
///
/// Returns [`Error::NoReferenceRepo`] if no candidate has the marker file.
pub fn locate(
    fs: &dyn FileSystem,
    candidates: &[PathBuf],
    marker: &str,
) -> Result<PathBuf, Error> {
    candidates
        .iter()
        .find(|dir| {
            let found = fs.exists(&dir.join(marker));
            debug!(candidate = %dir.display(), found, "checked reference candidate");
            found
        })
        .cloned()
        .ok_or_else(|| Error::NoReferenceRepo {
            candidates: candidates.iter().map(|c| c.display().to_string()).collect(),
            marker: marker.to_string(),
        })
}

/// Reads HEAD of the repository at `repo`, keeping the first `len` characters.
///
/// # Errors
///
/// Returns [`Error::NoCommit`] if git fails or reports an empty hash.
pub fn short_hash(git: &dyn GitRepo, repo: &Path, len: usize) -> Result<String, Error> {
    let full = git.current_commit(repo).map_err(|e| Error::NoCommit {
        repo: repo.display().to_string(),
        reason: e.to_string(),
    })?;
    let hash: String = full.trim().chars().take(len).collect();
    if hash.is_empty() {
        return Err(Error::NoCommit {
            repo: repo.display().to_string(),
            reason: "git reported an empty commit hash".to_string(),
        });
    }
    Ok(hash)
}
