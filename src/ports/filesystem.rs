//! Filesystem port for file I/O operations.

use std::path::Path;

/// Provides filesystem access for reading, writing and matching files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Reads a file as text, replacing invalid UTF-8 sequences with U+FFFD.
    ///
    /// Used for reference sources, where a stray non-UTF-8 byte must not hide
    /// the rest of the file. The default delegates to `read_to_string`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_lossy(&self, path: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.read_to_string(path)
    }

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Expands a glob pattern into the matching file paths, sorted.
    ///
    /// Directories matched by the pattern are not returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
