//! Git repository port for version-control queries.

use std::path::Path;

/// Provides read access to a git repository.
///
/// Abstracting git access allows deterministic replay and testing
/// without requiring a real repository.
pub trait GitRepo: Send + Sync {
    /// Returns the full hash of the HEAD commit of the repository at `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if `repo` is not a git checkout or has no commits.
    fn current_commit(
        &self,
        repo: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
