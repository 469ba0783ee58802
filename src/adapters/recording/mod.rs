//! Recording adapters that capture interactions to cassettes.

pub mod filesystem;
pub mod git;

pub use filesystem::RecordingFileSystem;
pub use git::RecordingGitRepo;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Converts a recorded value to JSON.
///
/// A value that cannot be serialized is logged and the interaction is not
/// recorded, so a cassette never holds a placeholder in its place.
fn to_json<T: Serialize>(port: &str, method: &str, value: &T) -> Option<serde_json::Value> {
    match serde_json::to_value(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!(port, method, error = %e, "interaction not recorded");
            None
        }
    }
}

/// Record an interaction with a simple (non-Result) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let Some(input_json) = to_json(port, method, input) else {
        return;
    };
    let Some(output_json) = to_json(port, method, output) else {
        return;
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a `Result<T, E>` interaction using the ok/err JSON convention.
///
/// - `Ok(v)` is stored as `{"ok": v}`
/// - `Err(e)` is stored as `{"err": e.to_string()}`
///
/// `replaying::replay_result` reads the same shape back.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let Some(input_json) = to_json(port, method, input) else {
        return;
    };

    let output_json = match result {
        Ok(v) => {
            let Some(value) = to_json(port, method, v) else {
                return;
            };
            serde_json::json!({ "ok": value })
        }
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
