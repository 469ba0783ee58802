//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Default reference repository web root.
pub const DEFAULT_LINK_BASE: &str = "https://github.com/microsoft/TypeScript";

/// Directories searched for the reference repository, in order.
pub const DEFAULT_CANDIDATES: [&str; 3] = ["../typescript-compiler", "../TypeScript", "TypeScript"];

/// Top-level CLI parser for `findlinks`.
#[derive(Debug, Parser)]
#[command(
    name = "findlinks",
    version,
    about = "Rewrite `[n]: <path - search term>` references into commit-pinned permalinks"
)]
pub struct Cli {
    /// Glob of markdown files to update, e.g. `docs/**/*.md`.
    pub glob: String,

    /// Any value enables write mode (same as `--write`).
    #[arg(value_name = "WRITE")]
    pub write_positional: Option<String>,

    /// Write updated files back instead of printing them.
    #[arg(short, long)]
    pub write: bool,

    /// Candidate reference repository directory; repeat to try several.
    #[arg(long = "repo", value_name = "DIR")]
    pub repos: Vec<PathBuf>,

    /// File that marks a directory as the reference repository.
    #[arg(long, default_value = "package.json")]
    pub marker: String,

    /// Web root that `/blob/<commit>/<path>` is appended to.
    #[arg(long, default_value = DEFAULT_LINK_BASE)]
    pub link_base: String,

    /// Number of commit hash characters kept in links.
    #[arg(
        long,
        default_value_t = 8,
        value_parser = clap::value_parser!(u16).range(1..=64)
    )]
    pub hash_len: u16,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
