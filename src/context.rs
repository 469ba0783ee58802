//! Service context bundling the port trait objects.

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::live::{LiveFileSystem, LiveGitRepo};
use crate::adapters::recording::{RecordingFileSystem, RecordingGitRepo};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingGitRepo};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::GitRepo;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Filesystem for markdown and reference-source I/O.
    pub fs: Box<dyn FileSystem>,
    /// Git access for reading the reference repository's HEAD.
    pub git: Box<dyn GitRepo>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk and the `git` CLI.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo),
        }
    }

    /// Creates a context whose ports are custom implementations.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, git: Box<dyn GitRepo>) -> Self {
        Self { fs, git }
    }

    /// Creates a live context that records every interaction into
    /// per-port cassettes under `dir`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording directory cannot be prepared.
    pub fn recording_at(dir: PathBuf) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir)?;
        let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs));
        let git = RecordingGitRepo::new(Box::new(LiveGitRepo), Arc::clone(&session.git));
        let ctx = Self {
            fs: Box::new(fs),
            git: Box::new(git),
        };
        Ok((ctx, session))
    }

    /// Creates a context that replays the ports configured in `config`.
    ///
    /// Ports without a cassette use the live adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(LiveFileSystem),
            },
            git: match replayers.git {
                Some(r) => Box::new(ReplayingGitRepo::new(r)),
                None => Box::new(LiveGitRepo),
            },
        })
    }
}
