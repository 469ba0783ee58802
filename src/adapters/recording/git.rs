//! Recording adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::GitRepo;

/// Records git interactions while delegating to an inner implementation.
///
/// A successful `current_commit` also stamps the cassette with that commit.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RepoInput<'a> {
    repo: &'a str,
}

impl GitRepo for RecordingGitRepo {
    fn current_commit(
        &self,
        repo: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.current_commit(repo);
        let repo = repo.display().to_string();
        let input = RepoInput { repo: &repo };
        record_result(&self.recorder, "git", "current_commit", &input, &result);
        if let Ok(commit) = &result {
            self.recorder
                .lock()
                .expect("recorder lock poisoned")
                .set_commit(commit.as_str());
        }
        result
    }
}
