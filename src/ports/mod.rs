//! Port traits defining external boundaries.
//!
//! The link rewriter only touches two external systems: the filesystem
//! (markdown documents and reference sources) and git (the reference
//! repository's HEAD). Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod git;

pub use filesystem::FileSystem;
pub use git::GitRepo;
