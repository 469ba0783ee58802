//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
///
/// Writes are not performed; they only consume the recorded outcome.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        replay_result(&self.replayer, "fs", "read_to_string")
    }

    fn read_lossy(&self, _path: &Path) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        replay_result(&self.replayer, "fs", "read_lossy")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "write")?;
        if let Some(err) = output.get("err") {
            let msg = err.as_str().unwrap_or("unknown error").to_string();
            return Err(msg.into());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        match next_output(&self.replayer, "fs", "exists") {
            Ok(output) => output.as_bool().unwrap_or(false),
            Err(e) => {
                tracing::warn!(path = %path.display(), "{e}");
                false
            }
        }
    }

    fn glob(
        &self,
        _pattern: &str,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        replay_result(&self.replayer, "fs", "glob")
    }
}
