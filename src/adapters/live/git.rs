//! Live git adapter using `git` CLI commands.

use std::path::Path;
use std::process::Command;

use crate::ports::git::GitRepo;

/// Live git adapter that shells out to the `git` CLI.
pub struct LiveGitRepo;

impl GitRepo for LiveGitRepo {
    fn current_commit(
        &self,
        repo: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(repo)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git rev-parse HEAD failed: {stderr}").into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
