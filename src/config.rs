//! Run configuration resolved from the command line.

use std::path::PathBuf;

use crate::cli::{Cli, DEFAULT_CANDIDATES};

/// Markdown paths that are never rewritten.
pub const SKIPPED_FILES: [&str; 1] = ["README.md"];

/// Everything a run needs besides its ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Glob selecting the markdown files.
    pub glob: String,
    /// Write changed files back instead of printing them.
    pub write: bool,
    /// Candidate reference repository directories, in priority order.
    pub candidates: Vec<PathBuf>,
    /// Marker file identifying the reference repository.
    pub marker: String,
    /// Web root for generated links.
    pub link_base: String,
    /// Commit hash characters kept in links.
    pub hash_len: usize,
    /// Paths skipped even when the glob matches them.
    pub skip: Vec<String>,
}

impl Config {
    /// Returns `true` if `file` should not be processed.
    #[must_use]
    pub fn is_skipped(&self, file: &str) -> bool {
        self.skip.iter().any(|s| s == file)
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        let candidates = if cli.repos.is_empty() {
            DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect()
        } else {
            cli.repos.clone()
        };
        Self {
            glob: cli.glob.clone(),
            write: cli.write || cli.write_positional.is_some(),
            candidates,
            marker: cli.marker.clone(),
            link_base: cli.link_base.clone(),
            hash_len: usize::from(cli.hash_len),
            skip: SKIPPED_FILES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
