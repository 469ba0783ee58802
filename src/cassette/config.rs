//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Environment variable naming a cassette that replaces the filesystem port.
pub const REPLAY_FS_ENV: &str = "FINDLINKS_REPLAY_FS";
/// Environment variable naming a cassette that replaces the git port.
pub const REPLAY_GIT_ENV: &str = "FINDLINKS_REPLAY_GIT";

/// Per-port cassette file paths. Ports without a cassette stay live.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CassetteConfig {
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the git port cassette file.
    pub git: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the git port.
    pub git: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Reads the replay configuration from `FINDLINKS_REPLAY_FS` and
    /// `FINDLINKS_REPLAY_GIT`. Empty values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self {
            fs: path(REPLAY_FS_ENV),
            git: path(REPLAY_GIT_ENV),
        }
    }

    /// Returns `true` if no port is replayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fs.is_none() && self.git.is_none()
    }

    /// Load a single cassette file and create a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_port_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    fn load_optional(path: Option<&Path>) -> Result<Option<CassetteReplayer>, String> {
        path.map(Self::load_port_cassette).transpose()
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            fs: Self::load_optional(self.fs.as_deref())?,
            git: Self::load_optional(self.git.as_deref())?,
        })
    }
}
