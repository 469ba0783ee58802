//! Permalink lines pointing into the reference repository.

use std::fmt;

/// A generated `[label]: <base>/blob/<commit>/<path>#L<line>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Footnote label copied from the annotation.
    pub label: String,
    /// Repository web root, e.g. `https://github.com/microsoft/TypeScript`.
    pub base: String,
    /// Short commit hash the link is pinned to.
    pub commit: String,
    /// Path relative to the repository root.
    pub file_path: String,
    /// 1-based line number; `None` drops the `#L` fragment.
    pub line: Option<usize>,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]: {}/blob/{}/{}",
            self.label,
            self.base.trim_end_matches('/'),
            self.commit,
            self.file_path.trim_start_matches("./")
        )?;
        if let Some(line) = self.line {
            write!(f, "#L{line}")?;
        }
        Ok(())
    }
}
