//! The update pipeline: find files, resolve annotations, write or print.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::linkage::rewrite_document;
use crate::reference::ReferenceRepo;
use crate::report::{Failure, FailureReport};

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Markdown files processed.
    pub files: usize,
    /// Files whose content changed.
    pub changed: usize,
    /// Links placed across all files.
    pub linked: usize,
}

/// Runs the update over every file matched by `config.glob`.
///
/// In dry-run mode each processed document is printed to `out`; in write
/// mode changed documents are written back through `ctx.fs`.
///
/// # Errors
///
/// Returns a fatal [`Error`] when the glob is bad or empty, the reference
/// repository or its commit cannot be found, or a markdown file cannot be
/// read or written. Returns [`Error::Unresolved`] after processing every file
/// if any annotation failed.
pub fn run_with_context(
    ctx: &ServiceContext,
    config: &Config,
    out: &mut dyn Write,
) -> Result<Summary, Error> {
    let repo = ReferenceRepo::discover(
        ctx.fs.as_ref(),
        ctx.git.as_ref(),
        &config.candidates,
        &config.marker,
        config.hash_len,
    )?;

    let files = ctx.fs.glob(&config.glob).map_err(|e| Error::InvalidGlob {
        pattern: config.glob.clone(),
        reason: e.to_string(),
    })?;
    if files.is_empty() {
        return Err(Error::NoFiles(config.glob.clone()));
    }

    let mut summary = Summary::default();
    let mut failures: Vec<Failure> = Vec::new();

    for file in &files {
        if config.is_skipped(file) {
            debug!(file = %file, "skipping");
            continue;
        }
        let path = Path::new(file);
        let text = ctx.fs.read_to_string(path).map_err(|e| Error::Io {
            action: "read",
            path: file.clone(),
            reason: e.to_string(),
        })?;

        let rewrite = rewrite_document(ctx.fs.as_ref(), &repo, &config.link_base, file, &text);
        let changed = rewrite.content != text;
        info!(
            file = %file,
            linked = rewrite.linked,
            failed = rewrite.failures.len(),
            changed,
            "processed"
        );

        summary.files += 1;
        summary.linked += rewrite.linked;
        if changed {
            summary.changed += 1;
        }

        if config.write {
            if changed {
                ctx.fs.write(path, &rewrite.content).map_err(|e| Error::Io {
                    action: "write",
                    path: file.clone(),
                    reason: e.to_string(),
                })?;
            }
        } else {
            print_document(out, file, &rewrite.content)?;
        }
        failures.extend(rewrite.failures);
    }

    if failures.is_empty() {
        Ok(summary)
    } else {
        Err(Error::Unresolved(FailureReport(failures)))
    }
}

fn print_document(out: &mut dyn Write, file: &str, content: &str) -> Result<(), Error> {
    let io_err = |e: std::io::Error| Error::Io {
        action: "print",
        path: file.to_string(),
        reason: e.to_string(),
    };
    out.write_all(content.as_bytes()).map_err(io_err)?;
    if !content.ends_with('\n') {
        out.write_all(b"\n").map_err(io_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DEFAULT_LINK_BASE;
    use crate::ports::{FileSystem, GitRepo};
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    type Files = Arc<Mutex<BTreeMap<String, String>>>;

    struct MemoryFs(Files);

    impl FileSystem for MemoryFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            let key = path.to_string_lossy().into_owned();
            self.0
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .ok_or_else(|| format!("missing {key}").into())
        }
        fn write(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            let key = path.to_string_lossy().into_owned();
            self.0.lock().unwrap().insert(key, contents.into());
            Ok(())
        }
        fn exists(&self, path: &Path) -> bool {
            let key = path.to_string_lossy();
            self.0.lock().unwrap().contains_key(&*key)
        }
        fn glob(
            &self,
            pattern: &str,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            if pattern.contains('[') {
                return Err("Pattern syntax error".into());
            }
            let prefix = pattern.trim_end_matches("*.md");
            let files = self.0.lock().unwrap();
            let matched = files
                .keys()
                .filter(|k| k.starts_with(prefix) && k.ends_with(".md"))
                .filter(|k| !k[prefix.len()..].contains('/'))
                .cloned()
                .collect();
            Ok(matched)
        }
    }

    struct FixedGit;

    impl GitRepo for FixedGit {
        fn current_commit(
            &self,
            _repo: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Ok("8d986554aaaabbbbccccdddd".into())
        }
    }

    fn setup(files: &[(&str, &str)]) -> (ServiceContext, Files) {
        let mut map: BTreeMap<String, String> = files
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        map.insert("TypeScript/package.json".into(), "{}".into());
        let files = Arc::new(Mutex::new(map));
        let fs = MemoryFs(Arc::clone(&files));
        let ctx = ServiceContext::new(Box::new(fs), Box::new(FixedGit));
        (ctx, files)
    }

    fn config(glob: &str, write: bool) -> Config {
        Config {
            glob: glob.into(),
            write,
            candidates: vec![PathBuf::from("../TypeScript"), PathBuf::from("TypeScript")],
            marker: "package.json".into(),
            link_base: DEFAULT_LINK_BASE.into(),
            hash_len: 8,
            skip: vec!["README.md".into()],
        }
    }

    const ANNOTATED: &str = "[1]: <src/a.ts - foo>\n";

    const LINKED: &str = "[1]: https://github.com/microsoft/TypeScript/blob/8d986554/src/a.ts#L2\n[1]: <src/a.ts - foo>\n";

    #[test]
    fn dry_run_prints_and_leaves_files_alone() {
        let (ctx, files) = setup(&[
            ("docs/a.md", ANNOTATED),
            ("TypeScript/src/a.ts", "bar\nfoo\n"),
        ]);
        let dry = config("docs/*.md", false);
        let mut out = Vec::new();

        let summary = run_with_context(&ctx, &dry, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), LINKED);
        assert_eq!((summary.files, summary.changed, summary.linked), (1, 1, 1));
        assert_eq!(files.lock().unwrap()["docs/a.md"], ANNOTATED);
    }

    #[test]
    fn write_mode_updates_only_changed_files_and_is_idempotent() {
        let (ctx, files) = setup(&[
            ("docs/a.md", ANNOTATED),
            ("docs/b.md", "no annotations"),
            ("TypeScript/src/a.ts", "bar\nfoo\n"),
        ]);
        let write = config("docs/*.md", true);
        let mut out = Vec::new();

        let first = run_with_context(&ctx, &write, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(first.files, 2);
        assert_eq!(first.changed, 1);
        assert_eq!(files.lock().unwrap()["docs/a.md"], LINKED);

        let second = run_with_context(&ctx, &write, &mut out).unwrap();
        assert_eq!(second.changed, 0);
        assert_eq!(files.lock().unwrap()["docs/a.md"], LINKED);
    }

    #[test]
    fn failures_are_collected_across_files() {
        let (ctx, files) = setup(&[
            ("docs/a.md", "[1]: <src/moved.ts - foo>\n"),
            ("docs/b.md", "[2]: <src/a.ts - gone>\n[3]: <src/a.ts - foo>\n"),
            ("TypeScript/src/a.ts", "bar\nfoo\n"),
        ]);
        let write = config("docs/*.md", true);
        let mut out = Vec::new();

        let err = run_with_context(&ctx, &write, &mut out).unwrap_err();

        let Error::Unresolved(report) = err else {
            panic!("expected unresolved failures")
        };
        let paths: Vec<(&str, &str)> = report
            .0
            .iter()
            .map(|f| (f.file.as_str(), f.path.as_str()))
            .collect();
        let expected = [
            ("docs/a.md", "src/moved.ts"),
            ("docs/b.md", "src/a.ts"),
        ];
        assert_eq!(paths, expected);
        let files = files.lock().unwrap();
        // The resolvable annotation in b.md is still written.
        assert!(files["docs/b.md"].contains("src/a.ts#L2\n[3]:"));
        assert_eq!(files["docs/a.md"], "[1]: <src/moved.ts - foo>\n");
    }

    #[test]
    fn root_readme_is_skipped() {
        let (ctx, files) = setup(&[
            ("README.md", ANNOTATED),
            ("TypeScript/src/a.ts", "foo\n"),
        ]);
        let write = config("*.md", true);
        let mut out = Vec::new();

        let summary = run_with_context(&ctx, &write, &mut out).unwrap();

        assert_eq!(summary.files, 0);
        assert_eq!(files.lock().unwrap()["README.md"], ANNOTATED);
    }

    #[test]
    fn fatal_preconditions() {
        let (ctx, _) = setup(&[]);
        let mut out = Vec::new();

        assert!(matches!(
            run_with_context(&ctx, &config("docs/*.md", false), &mut out),
            Err(Error::NoFiles(_))
        ));
        assert!(matches!(
            run_with_context(&ctx, &config("docs/[", false), &mut out),
            Err(Error::InvalidGlob { .. })
        ));

        let mut no_repo = config("docs/*.md", false);
        no_repo.candidates = vec![PathBuf::from("elsewhere")];
        assert!(matches!(
            run_with_context(&ctx, &no_repo, &mut out),
            Err(Error::NoReferenceRepo { .. })
        ));
    }
}
