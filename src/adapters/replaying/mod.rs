//! Replaying adapters that serve recorded interactions.

pub mod filesystem;
pub mod git;

pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;

/// Pull the output of the next `port::method` interaction from a replayer.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    let interaction = replayer.next_interaction(port, method)?;
    Ok(interaction.output.clone())
}

/// Replay a fallible interaction stored as `{"ok": value}` or `{"err": "message"}`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    let output = next_output(replayer, port, method)?;
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| format!("{port}::{method}: failed to deserialize: {e}").into())
}
