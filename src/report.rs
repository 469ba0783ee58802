//! Per-annotation failures and the end-of-run report.

use std::fmt;

/// Why an annotation could not be turned into a line-anchored link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The referenced file could not be read from the reference repository.
    MissingFile(String),
    /// The file was read but holds no line with the search term.
    TermNotFound(String),
}

/// One annotation that failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Markdown file holding the annotation.
    pub file: String,
    /// Referenced path inside the reference repository.
    pub path: String,
    /// What went wrong.
    pub kind: FailureKind,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { file, path, kind } = self;
        match kind {
            FailureKind::MissingFile(reason) => {
                write!(f, "{file}: {path} (cannot read file: {reason})")
            }
            FailureKind::TermNotFound(term) => {
                write!(f, "{file}: {path} (no line contains {term:?})")
            }
        }
    }
}

/// Every failure of a run, rendered with a remediation hint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureReport(pub Vec<Failure>);

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Could not find the following references to update:")?;
        for failure in &self.0 {
            writeln!(f, "  {failure}")?;
        }
        write!(
            f,
            "Update the file paths or search terms; the code has likely moved in the reference repository."
        )
    }
}
