//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: &'a str,
    contents: &'a str,
}

#[derive(Serialize)]
struct GlobInput<'a> {
    pattern: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.read_to_string(path);
        let path = path.display().to_string();
        let input = PathInput { path: &path };
        record_result(&self.recorder, "fs", "read_to_string", &input, &result);
        result
    }

    fn read_lossy(&self, path: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.read_lossy(path);
        let path = path.display().to_string();
        let input = PathInput { path: &path };
        record_result(&self.recorder, "fs", "read_lossy", &input, &result);
        result
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let path = path.display().to_string();
        let input = WriteInput {
            path: &path,
            contents,
        };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        let path = path.display().to_string();
        let input = PathInput { path: &path };
        record_interaction(&self.recorder, "fs", "exists", &input, &result);
        result
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.glob(pattern);
        record_result(&self.recorder, "fs", "glob", &GlobInput { pattern }, &result);
        result
    }
}
