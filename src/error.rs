//! Error type for a run.

use thiserror::Error;

use crate::report::FailureReport;

/// Errors that end a run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum Error {
    /// Command-line arguments were rejected.
    #[error("{0}")]
    Usage(String),

    /// The markdown glob could not be parsed.
    #[error("invalid glob {pattern:?}: {reason}")]
    InvalidGlob {
        /// The pattern as given.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// The markdown glob matched nothing.
    #[error("did not get any files with the glob {0:?}")]
    NoFiles(String),

    /// None of the candidate directories holds the marker file.
    #[error("could not find a reference repository: none of [{}] contains {}", .candidates.join(", "), .marker)]
    NoReferenceRepo {
        /// Directories that were checked.
        candidates: Vec<String>,
        /// Marker file name that was looked for.
        marker: String,
    },

    /// The reference repository's HEAD could not be read.
    #[error("could not get the git commit of {repo}: {reason}")]
    NoCommit {
        /// Repository directory.
        repo: String,
        /// Underlying failure.
        reason: String,
    },

    /// A markdown file could not be read or written.
    #[error("{action} {path}: {reason}")]
    Io {
        /// `read` or `write`.
        action: &'static str,
        /// Markdown file path.
        path: String,
        /// Underlying failure.
        reason: String,
    },

    /// Recording or replay cassettes could not be set up or saved.
    #[error("cassette: {0}")]
    Cassette(String),

    /// One or more annotations did not resolve.
    #[error("{0}")]
    Unresolved(FailureReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(
            Error::NoFiles("docs/*.md".into()).to_string(),
            "did not get any files with the glob \"docs/*.md\""
        );

        let err = Error::NoReferenceRepo {
            candidates: vec!["../TypeScript".into(), "TypeScript".into()],
            marker: "package.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not find a reference repository: none of [../TypeScript, TypeScript] contains package.json"
        );
    }
}
