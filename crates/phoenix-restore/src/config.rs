//! Restore configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SESSION_FILE_NAME: &str = "session.dat";
pub const BACKUP_FILE_NAME: &str = "session.dat.old";

/// Session files are small; anything past this is not a session file
pub const DEFAULT_MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreConfig {
    /// Session written on the last shutdown (or last periodic save)
    pub session_file: PathBuf,
    /// Previous session, tried when the primary yields no windows
    pub backup_file: Option<PathBuf>,
    /// Larger files are treated as unreadable
    pub max_file_bytes: u64,
}

impl RestoreConfig {
    pub fn new(profile_dir: impl Into<PathBuf>) -> Self {
        let profile_dir = profile_dir.into();

        Self {
            session_file: profile_dir.join(SESSION_FILE_NAME),
            backup_file: Some(profile_dir.join(BACKUP_FILE_NAME)),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}
