//! Recording session managing per-port cassette recorders.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to `<output_dir>/<port>.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for git interactions.
    pub git: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session writing into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or already holds
    /// cassettes from a previous session.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, String> {
        let output_dir = output_dir.into();
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        for port in ["fs", "git"] {
            let existing = output_dir.join(format!("{port}.cassette.yaml"));
            if existing.exists() {
                return Err(format!("Cassette already exists: {}", existing.display()));
            }
        }

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, "unknown")))
        };

        Ok(Self {
            fs: make_recorder("fs"),
            git: make_recorder("git"),
            output_dir,
        })
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// The git cassette's commit stamp is copied onto the fs cassette so both
    /// files name the reference revision they were captured against.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn unwrap_one(
            arc: Arc<Mutex<CassetteRecorder>>,
            port: &str,
        ) -> Result<CassetteRecorder, String> {
            Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))
        }

        let git = unwrap_one(self.git, "git")?;
        let mut fs = unwrap_one(self.fs, "fs")?;
        fs.set_commit(git.commit());

        git.finish().map_err(|e| format!("Failed to write git cassette: {e}"))?;
        fs.finish().map_err(|e| format!("Failed to write fs cassette: {e}"))?;

        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use serde_json::json;

    #[test]
    fn session_writes_one_cassette_per_port() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cassettes");

        let session = RecordingSession::new(&out).unwrap();
        {
            let mut git = session.git.lock().unwrap();
            git.record(
                "git",
                "current_commit",
                json!({"repo": "TypeScript"}),
                json!({"ok": "abc"}),
            );
            git.set_commit("abc");
        }

        let written = session.finish().unwrap();
        assert_eq!(written, out);

        let fs_yaml = std::fs::read_to_string(out.join("fs.cassette.yaml")).unwrap();
        let fs_cassette = Cassette::from_yaml(&fs_yaml).unwrap();
        assert!(fs_cassette.interactions.is_empty());
        assert_eq!(fs_cassette.commit, "abc");
        assert!(out.join("git.cassette.yaml").exists());
    }

    #[test]
    fn refuses_to_overwrite_existing_cassettes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("git.cassette.yaml"), "").unwrap();

        let err = RecordingSession::new(dir.path()).err().unwrap();
        assert!(err.contains("already exists"));
    }

    #[test]
    fn finish_fails_while_adapter_holds_recorder() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(dir.path()).unwrap();
        let _held = Arc::clone(&session.fs);

        let err = session.finish().unwrap_err();
        assert!(err.contains("fs still has references"));
    }
}
