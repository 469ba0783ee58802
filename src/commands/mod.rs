//! Command dispatch and handlers.

pub mod update;

use std::env;
use std::io::Write;
use std::path::PathBuf;

use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::Error;

/// Environment variable naming a directory to record port cassettes into.
pub const RECORD_ENV: &str = "FINDLINKS_RECORD";

/// Build the service context and run the update.
///
/// When `FINDLINKS_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files in that directory. Otherwise
/// `FINDLINKS_REPLAY_FS` / `FINDLINKS_REPLAY_GIT` select replayed ports.
///
/// # Errors
///
/// Returns the update's error, or [`Error::Cassette`] if recording or replay
/// cannot be set up.
pub fn dispatch(config: &Config, out: &mut dyn Write) -> Result<update::Summary, Error> {
    let (ctx, session) = if let Ok(path) = env::var(RECORD_ENV) {
        let recording = ServiceContext::recording_at(PathBuf::from(path));
        let (ctx, session) = recording.map_err(Error::Cassette)?;
        (ctx, Some(session))
    } else {
        let replay = CassetteConfig::from_env();
        if replay.is_empty() {
            (ServiceContext::live(), None)
        } else {
            let ctx = ServiceContext::replaying_from(&replay);
            (ctx.map_err(Error::Cassette)?, None)
        }
    };

    let result = update::run_with_context(&ctx, config, out);

    // Finish recording after the run completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        return finish_after_run(result, session);
    }

    result
}

/// Saves the recording. A failed run keeps its own error; the recording
/// failure is only logged then.
fn finish_after_run<T>(result: Result<T, Error>, session: RecordingSession) -> Result<T, Error> {
    match (finish_recording(session), result) {
        (Ok(()), result) => result,
        (Err(e), Ok(_)) => Err(e),
        (Err(e), Err(run_err)) => {
            tracing::warn!(error = %e, "recording not saved");
            Err(run_err)
        }
    }
}

/// Finish a recording session and report the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), Error> {
    let output_dir = session.finish().map_err(Error::Cassette)?;
    tracing::info!(dir = %output_dir.display(), "recording saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn recording_failure_keeps_the_run_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(dir.path().join("rec")).unwrap();
        let held = Arc::clone(&session.fs);

        let run: Result<(), Error> = Err(Error::NoFiles("docs/*.md".into()));
        let err = finish_after_run(run, session).unwrap_err();

        assert!(matches!(err, Error::NoFiles(_)), "{err}");
        drop(held);
    }

    #[test]
    fn recording_failure_fails_a_clean_run() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(dir.path().join("rec")).unwrap();
        let held = Arc::clone(&session.git);

        let err = finish_after_run(Ok(()), session).unwrap_err();

        assert!(matches!(err, Error::Cassette(_)), "{err}");
        drop(held);
    }

    #[test]
    fn saved_recording_passes_the_run_result_through() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(dir.path().join("rec")).unwrap();

        assert_eq!(finish_after_run(Ok(3), session).unwrap(), 3);
        assert!(dir.path().join("rec/git.cassette.yaml").exists());
    }
}
