//! Restore summary
//!
//! What happened while the session was read. Purely diagnostic: the UI
//! restores from `RestoreManager::restore_data` whatever this says.

use chrono::{DateTime, Utc};
use phoenix_codec::DecodeStats;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestoreSummary {
    /// File the windows came from, `None` when restored from memory
    pub source: Option<PathBuf>,
    pub format_version: Option<u32>,
    /// Modification time of the session file
    pub saved_at: Option<DateTime<Utc>>,
    pub windows_restored: usize,
    pub tabs_restored: usize,
    pub stats: DecodeStats,
    /// Absorbed error that left nothing to restore
    pub failure: Option<String>,
}

impl RestoreSummary {
    /// Every window the file announced was restored
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
            && self.stats.windows_corrupt == 0
            && self.stats.windows_empty == 0
            && !self.stats.truncated
    }
}

impl fmt::Display for RestoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self
            .source
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "memory".to_string());

        if let Some(failure) = &self.failure {
            return write!(f, "Nothing restored from {source}: {failure}");
        }

        write!(
            f,
            "Restored {} window(s) with {} tab(s) from {source}",
            self.windows_restored, self.tabs_restored
        )?;
        if let Some(version) = self.format_version {
            write!(f, " (format v{version})")?;
        }
        if self.stats.windows_corrupt > 0 {
            write!(f, ", {} corrupt window(s) skipped", self.stats.windows_corrupt)?;
        }
        if self.stats.windows_empty > 0 {
            write!(f, ", {} empty window(s) dropped", self.stats.windows_empty)?;
        }
        if self.stats.truncated {
            write!(f, ", file ended early")?;
        }
        Ok(())
    }
}
