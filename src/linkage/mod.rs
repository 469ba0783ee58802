//! Annotation linkage: from `[n]: <path - term>` to commit-pinned permalinks.
//!
//! A markdown document is parsed into annotation blocks, each annotation is
//! resolved against the reference repository, and the resulting link line is
//! inserted above the annotation or replaces the link generated on a previous
//! run.

pub mod document;
pub mod lines;
pub mod link;
pub mod resolve;

pub use document::{Annotation, AnnotationBlock, Document};
pub use lines::{find_line, lines_containing, LineMatch};
pub use link::Link;
pub use resolve::{resolve, rewrite_document, Resolution, Rewrite};
