//! Resolution of annotations against the reference repository.

use tracing::{debug, warn};

use super::document::{Annotation, Document};
use super::lines::{find_line, LineMatch};
use super::link::Link;
use crate::ports::FileSystem;
use crate::reference::ReferenceRepo;
use crate::report::{Failure, FailureKind};

/// Outcome of resolving a single annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The search term was found; the link is anchored at its line.
    Found {
        /// Link anchored at the match.
        link: Link,
        /// The matching line.
        found: LineMatch,
    },
    /// The file was read but the term is absent; the link has no anchor.
    TermNotFound {
        /// Link to the file without a line fragment.
        link: Link,
    },
    /// The referenced file could not be read; nothing is written.
    MissingFile {
        /// Read error message.
        reason: String,
    },
}

/// Resolves one annotation by reading its file from `repo`.
pub fn resolve(
    fs: &dyn FileSystem,
    repo: &ReferenceRepo,
    link_base: &str,
    annotation: &Annotation,
) -> Resolution {
    let path = repo.join(&annotation.file_path);
    let source = match fs.read_lossy(&path) {
        Ok(source) => source,
        Err(e) => {
            let reason = e.to_string();
            return Resolution::MissingFile { reason };
        }
    };

    let found = find_line(&source, &annotation.search_term);
    let link = Link {
        label: annotation.label.clone(),
        base: link_base.to_string(),
        commit: repo.commit.clone(),
        file_path: annotation.file_path.clone(),
        line: found.as_ref().map(|m| m.number),
    };
    match found {
        Some(found) => Resolution::Found { link, found },
        None => Resolution::TermNotFound { link },
    }
}

/// Result of rewriting one markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The updated document text.
    pub content: String,
    /// Number of annotations whose link was placed.
    pub linked: usize,
    /// Annotations that did not resolve to a line.
    pub failures: Vec<Failure>,
}

/// Rewrites every annotation in `text`, the contents of markdown file `file`.
///
/// Annotations whose file cannot be read are left untouched. Annotations
/// whose term is absent still get an unanchored link and are reported.
pub fn rewrite_document(
    fs: &dyn FileSystem,
    repo: &ReferenceRepo,
    link_base: &str,
    file: &str,
    text: &str,
) -> Rewrite {
    let mut doc = Document::parse(text);
    let mut edits = Vec::new();
    let mut failures = Vec::new();

    for block in doc.blocks() {
        let annotation = &block.annotation;
        let failure = |kind| Failure {
            file: file.to_string(),
            path: annotation.file_path.clone(),
            kind,
        };

        match resolve(fs, repo, link_base, annotation) {
            Resolution::Found { link, found } => {
                debug!(
                    file,
                    label = %annotation.label,
                    path = %annotation.file_path,
                    line = found.number,
                    replace = block.replaces_existing(),
                    "resolved annotation"
                );
                edits.push((block.clone(), link.to_string()));
            }
            Resolution::TermNotFound { link } => {
                warn!(
                    file,
                    path = %annotation.file_path,
                    term = %annotation.search_term,
                    "search term not found"
                );
                let term = annotation.search_term.clone();
                failures.push(failure(FailureKind::TermNotFound(term)));
                edits.push((block.clone(), link.to_string()));
            }
            Resolution::MissingFile { reason } => {
                warn!(file, path = %annotation.file_path, %reason, "cannot read referenced file");
                failures.push(failure(FailureKind::MissingFile(reason)));
            }
        }
    }

    let linked = edits.len();
    doc.apply(edits);
    Rewrite {
        content: doc.render(),
        linked,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    struct SourceFs(HashMap<PathBuf, String>);

    impl SourceFs {
        fn with(files: &[(&str, &str)]) -> Self {
            let files = files
                .iter()
                .map(|(p, c)| (PathBuf::from(p), (*c).to_string()));
            Self(files.collect())
        }
    }

    impl FileSystem for SourceFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| format!("No such file or directory: {}", path.display()).into())
        }
        fn write(
            &self,
            _path: &Path,
            _contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.contains_key(path)
        }
        fn glob(
            &self,
            _pattern: &str,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(vec![])
        }
    }

    const BASE: &str = "https://github.com/microsoft/TypeScript";

    fn repo() -> ReferenceRepo {
        ReferenceRepo {
            path: PathBuf::from("TypeScript"),
            commit: "8d986554".into(),
        }
    }

    fn checker() -> String {
        let mut lines = vec!["// filler"; 30307];
        lines.push("    function checkIfStatement(node: IfStatement) {");
        lines.push("    }");
        lines.join("\n")
    }

    #[test]
    fn inserts_anchored_link_above_annotation() {
        let source = checker();
        let fs = SourceFs::with(&[("TypeScript/src/compiler/checker.ts", &source)]);
        let text = "See [13].\n\n[13]: <src/compiler/checker.ts - function checkIfStatement>\n";

        let rewrite = rewrite_document(&fs, &repo(), BASE, "docs/a.md", text);

        assert_eq!(
            rewrite.content,
            "See [13].\n\n[13]: https://github.com/microsoft/TypeScript/blob/8d986554/src/compiler/checker.ts#L30308\n[13]: <src/compiler/checker.ts - function checkIfStatement>\n"
        );
        assert_eq!(rewrite.linked, 1);
        assert!(rewrite.failures.is_empty());
    }

    #[test]
    fn document_without_annotations_is_unchanged() {
        let fs = SourceFs::with(&[]);
        let text = "# Title\r\n\nNo references here. [1]: plain\n";
        let rewrite = rewrite_document(&fs, &repo(), BASE, "docs/a.md", text);

        assert_eq!(rewrite.content, text);
        assert_eq!(rewrite.linked, 0);
    }

    #[test]
    fn replaces_stale_link_and_is_idempotent() {
        let fs = SourceFs::with(&[("TypeScript/src/a.ts", "one\ntwo\nfoo()\n")]);
        let text = "[1]: https://github.com/microsoft/TypeScript/blob/00000000/src/a.ts#L1\n[1]: <src/a.ts - foo()>\n";

        let first = rewrite_document(&fs, &repo(), BASE, "docs/a.md", text);
        assert_eq!(
            first.content,
            "[1]: https://github.com/microsoft/TypeScript/blob/8d986554/src/a.ts#L3\n[1]: <src/a.ts - foo()>\n"
        );

        let second = rewrite_document(&fs, &repo(), BASE, "docs/a.md", &first.content);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn missing_term_links_without_anchor_and_fails() {
        let fs = SourceFs::with(&[("TypeScript/src/a.ts", "nothing here\n")]);
        let text = "[2]: <src/a.ts - function gone>\n";

        let rewrite = rewrite_document(&fs, &repo(), BASE, "docs/a.md", text);

        assert_eq!(
            rewrite.content,
            "[2]: https://github.com/microsoft/TypeScript/blob/8d986554/src/a.ts\n[2]: <src/a.ts - function gone>\n"
        );
        assert_eq!(rewrite.failures.len(), 1);
        assert_eq!(rewrite.failures[0].path, "src/a.ts");
        let expected = FailureKind::TermNotFound("function gone".into());
        assert_eq!(rewrite.failures[0].kind, expected);
    }

    #[test]
    fn missing_file_leaves_document_untouched() {
        let fs = SourceFs::with(&[("TypeScript/src/a.ts", "foo\n")]);
        let text = "[1]: <src/moved.ts - foo>\n[2]: <src/a.ts - foo>\n";

        let rewrite = rewrite_document(&fs, &repo(), BASE, "docs/a.md", text);

        assert_eq!(
            rewrite.content,
            "[1]: <src/moved.ts - foo>\n[2]: https://github.com/microsoft/TypeScript/blob/8d986554/src/a.ts#L1\n[2]: <src/a.ts - foo>\n"
        );
        assert_eq!(rewrite.failures.len(), 1);
        assert!(matches!(rewrite.failures[0].kind, FailureKind::MissingFile(_)));
        assert_eq!(rewrite.failures[0].file, "docs/a.md");
    }

    #[test]
    fn resolve_reports_matched_line() {
        let fs = SourceFs::with(&[("TypeScript/src/a.ts", "a\nb foo c\n")]);
        let annotation = Annotation::parse("[x]: <src/a.ts - foo>").unwrap();

        match resolve(&fs, &repo(), BASE, &annotation) {
            Resolution::Found { link, found } => {
                assert_eq!(link.line, Some(2));
                assert_eq!(found.line, "b foo c");
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn non_utf8_source_still_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("a.ts"), b"// caf\xe9\nfunction foo() {}\n").unwrap();
        let repo = ReferenceRepo {
            path: dir.path().to_path_buf(),
            commit: "8d986554".into(),
        };
        let text = "[1]: <src/a.ts - function foo>\n";

        let rewrite = rewrite_document(&LiveFileSystem, &repo, BASE, "docs/a.md", text);

        assert!(rewrite.failures.is_empty());
        assert_eq!(rewrite.linked, 1);
        let link = rewrite.content.lines().next().unwrap();
        assert!(link.ends_with("/blob/8d986554/src/a.ts#L2"), "{link}");
    }
}
