//! Restore Manager
//!
//! Reads and decodes the session file once, at construction, and then
//! serves the resulting windows read-only. Construction never fails: a
//! missing file, an unreadable one and a corrupt one all restore nothing.

use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use phoenix_codec::{DecodedSession, SessionDecoder};
use phoenix_records::WindowStateRecord;

use crate::config::{RestoreConfig, DEFAULT_MAX_FILE_BYTES};
use crate::error::RestoreError;
use crate::summary::RestoreSummary;
use crate::Result;

#[derive(Debug, Clone)]
pub struct RestoreManager {
    /// Windows in the order they were saved
    windows: Vec<WindowStateRecord>,
    summary: RestoreSummary,
}

impl RestoreManager {
    /// Restore from the session file at `session_file`.
    pub fn new(session_file: impl AsRef<Path>) -> Self {
        Self::open(session_file.as_ref(), DEFAULT_MAX_FILE_BYTES)
    }

    /// Restore from the configured session file, falling back to the
    /// backup file when the primary yields no windows.
    pub fn from_config(config: &RestoreConfig) -> Self {
        let primary = Self::open(&config.session_file, config.max_file_bytes);
        if !primary.is_empty() {
            return primary;
        }

        if let Some(backup_file) = &config.backup_file {
            let backup = Self::open(backup_file, config.max_file_bytes);
            if !backup.is_empty() {
                tracing::info!(
                    backup = %backup_file.display(),
                    "Primary session had nothing to restore, using backup"
                );
                return backup;
            }
        }

        primary
    }

    /// Restore from session bytes already in memory.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let summary = RestoreSummary::default();
        match SessionDecoder::new().decode(bytes) {
            Ok(decoded) => Self::from_decoded(decoded, summary),
            Err(e) => Self::failed(RestoreError::from(e), summary),
        }
    }

    /// Read and decode a session file, reporting why nothing could be read.
    ///
    /// Corrupt windows are still absorbed; only whole-file failures
    /// surface here.
    pub fn load(session_file: impl AsRef<Path>, max_file_bytes: u64) -> Result<DecodedSession> {
        let (bytes, _) = read_session_file(session_file.as_ref(), max_file_bytes)?;
        Ok(SessionDecoder::new().decode(&bytes)?)
    }

    fn open(path: &Path, max_file_bytes: u64) -> Self {
        let summary = RestoreSummary {
            source: Some(path.to_path_buf()),
            ..Default::default()
        };

        let (bytes, saved_at) = match read_session_file(path, max_file_bytes) {
            Ok(read) => read,
            Err(RestoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No saved session");
                return Self::failed(RestoreError::Io(e), summary);
            }
            Err(e) => return Self::failed(e, summary),
        };

        let summary = RestoreSummary { saved_at, ..summary };
        match SessionDecoder::new().decode(&bytes) {
            Ok(decoded) => Self::from_decoded(decoded, summary),
            Err(e) => Self::failed(RestoreError::from(e), summary),
        }
    }

    fn from_decoded(decoded: DecodedSession, summary: RestoreSummary) -> Self {
        let summary = RestoreSummary {
            format_version: Some(decoded.format_version),
            windows_restored: decoded.windows.len(),
            tabs_restored: decoded.windows.iter().map(WindowStateRecord::tab_count).sum(),
            stats: decoded.stats,
            ..summary
        };

        if summary.is_complete() {
            tracing::info!(%summary, "Session restored");
        } else {
            tracing::warn!(%summary, "Session partially restored");
        }

        Self {
            windows: decoded.windows,
            summary,
        }
    }

    fn failed(error: RestoreError, summary: RestoreSummary) -> Self {
        let summary = RestoreSummary {
            failure: Some(error.to_string()),
            ..summary
        };

        if !matches!(&error, RestoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound) {
            tracing::warn!(error = %error, "Could not restore session");
        }

        Self {
            windows: Vec::new(),
            summary,
        }
    }

    /// The restored windows, in saved order
    pub fn restore_data(&self) -> &[WindowStateRecord] {
        &self.windows
    }

    pub fn into_restore_data(self) -> Vec<WindowStateRecord> {
        self.windows
    }

    pub fn summary(&self) -> &RestoreSummary {
        &self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn tab_count(&self) -> usize {
        self.summary.tabs_restored
    }

    /// Restore data as JSON for the UI bridge
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.windows)?)
    }
}

fn read_session_file(path: &Path, max_file_bytes: u64) -> Result<(Vec<u8>, Option<DateTime<Utc>>)> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    if metadata.len() > max_file_bytes {
        return Err(RestoreError::TooLarge {
            size: metadata.len(),
            limit: max_file_bytes,
        });
    }

    // The file may grow between stat and read
    let mut bytes = Vec::with_capacity(metadata.len() as usize);
    file.take(max_file_bytes.saturating_add(1))
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_file_bytes {
        return Err(RestoreError::TooLarge {
            size: bytes.len() as u64,
            limit: max_file_bytes,
        });
    }

    let saved_at = metadata.modified().ok().map(DateTime::<Utc>::from);
    Ok((bytes, saved_at))
}

#[cfg(test)]
mod tests {
    use phoenix_codec::{ByteWriter, SessionEncoder};
    use phoenix_records::{OpaqueBlob, TabStateRecord};
    use std::path::PathBuf;
    use tempfile::TempDir;

    use super::*;

    fn window(name: &str, tabs: usize, current: i64) -> WindowStateRecord {
        let tabs = (0..tabs)
            .map(|i| TabStateRecord::new(format!("https://{name}.example/{i}"), format!("{name} {i}")))
            .collect();
        WindowStateRecord::new(current, OpaqueBlob::new(1, vec![0x10, 0x20]), tabs).unwrap()
    }

    fn abc() -> Vec<WindowStateRecord> {
        vec![window("a", 2, 0), window("b", 3, 2), window("c", 4, 1)]
    }

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_restores_windows_in_order() {
        let dir = TempDir::new().unwrap();
        let bytes = SessionEncoder::latest().encode(&abc()).unwrap();
        let path = write(&dir, "session.dat", &bytes);

        let manager = RestoreManager::new(&path);
        assert_eq!(manager.restore_data(), abc().as_slice());
        assert_eq!(manager.window_count(), 3);
        assert_eq!(manager.tab_count(), 9);

        let summary = manager.summary();
        assert!(summary.is_complete());
        assert_eq!(summary.source.as_deref(), Some(path.as_path()));
        assert_eq!(summary.format_version, Some(3));
        assert!(summary.saved_at.is_some());
    }

    #[test]
    fn test_missing_file_restores_nothing() {
        let dir = TempDir::new().unwrap();
        let manager = RestoreManager::new(dir.path().join("does-not-exist.dat"));
        assert!(manager.restore_data().is_empty());
        assert!(manager.summary().failure.is_some());
    }

    #[test]
    fn test_empty_file_restores_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "session.dat", b"");
        let manager = RestoreManager::new(path);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_unknown_version_restores_nothing() {
        let dir = TempDir::new().unwrap();
        let mut writer = ByteWriter::new();
        writer.put_header(77).put_u32(1);
        let path = write(&dir, "session.dat", writer.as_bytes());

        let manager = RestoreManager::new(&path);
        assert!(manager.is_empty());
        let failure = manager.summary().failure.clone().unwrap();
        assert!(failure.contains("77"), "{failure}");

        assert!(matches!(
            RestoreManager::load(&path, DEFAULT_MAX_FILE_BYTES),
            Err(RestoreError::Format(phoenix_codec::FormatError::UnsupportedVersion(77)))
        ));
    }

    #[test]
    fn test_truncated_third_window_keeps_first_two() {
        let dir = TempDir::new().unwrap();
        for version in phoenix_codec::supported_versions() {
            let bytes = SessionEncoder::new(version).unwrap().encode(&abc()).unwrap();
            // Inside C's tab list
            let path = write(&dir, "session.dat", &bytes[..bytes.len() - 12]);

            let manager = RestoreManager::new(&path);
            assert_eq!(manager.restore_data(), &abc()[..2], "version {version}");
            assert!(!manager.summary().is_complete());
            assert!(manager.summary().failure.is_none());
        }
    }

    #[test]
    fn test_restore_data_is_stable() {
        let bytes = SessionEncoder::latest().encode(&abc()).unwrap();
        let manager = RestoreManager::from_bytes(&bytes);
        let first = manager.restore_data().to_vec();
        let second = manager.restore_data().to_vec();
        assert_eq!(first, second);
        assert_eq!(manager.summary().source, None);

        let again = RestoreManager::from_bytes(&bytes);
        assert_eq!(again.restore_data(), manager.restore_data());
    }

    #[test]
    fn test_from_bytes_matches_file() {
        let dir = TempDir::new().unwrap();
        let bytes = SessionEncoder::new(2).unwrap().encode(&abc()).unwrap();
        let path = write(&dir, "session.dat", &bytes);

        assert_eq!(
            RestoreManager::new(path).into_restore_data(),
            RestoreManager::from_bytes(&bytes).into_restore_data()
        );
    }

    #[test]
    fn test_too_large_file_restores_nothing() {
        let dir = TempDir::new().unwrap();
        let bytes = SessionEncoder::latest().encode(&abc()).unwrap();
        let path = write(&dir, "session.dat", &bytes);

        let config = RestoreConfig {
            session_file: path.clone(),
            backup_file: None,
            max_file_bytes: 16,
        };
        let manager = RestoreManager::from_config(&config);
        assert!(manager.is_empty());

        assert!(matches!(
            RestoreManager::load(&path, 16),
            Err(RestoreError::TooLarge { limit: 16, .. })
        ));
    }

    #[test]
    fn test_backup_used_when_primary_corrupt() {
        let dir = TempDir::new().unwrap();
        let config = RestoreConfig::new(dir.path());
        std::fs::write(&config.session_file, b"garbage").unwrap();
        let backup = SessionEncoder::latest().encode(&abc()[..1]).unwrap();
        std::fs::write(config.backup_file.as_ref().unwrap(), backup).unwrap();

        let manager = RestoreManager::from_config(&config);
        assert_eq!(manager.restore_data(), &abc()[..1]);
        assert_eq!(manager.summary().source, config.backup_file);
    }

    #[test]
    fn test_primary_preferred_over_backup() {
        let dir = TempDir::new().unwrap();
        let config = RestoreConfig::new(dir.path());
        std::fs::write(&config.session_file, SessionEncoder::latest().encode(&abc()).unwrap()).unwrap();
        std::fs::write(
            config.backup_file.as_ref().unwrap(),
            SessionEncoder::latest().encode(&abc()[..1]).unwrap(),
        )
        .unwrap();

        let manager = RestoreManager::from_config(&config);
        assert_eq!(manager.window_count(), 3);
        assert_eq!(manager.summary().source.as_ref(), Some(&config.session_file));
    }

    #[test]
    fn test_no_files_at_all() {
        let dir = TempDir::new().unwrap();
        let config = RestoreConfig::new(dir.path());
        let manager = RestoreManager::from_config(&config);
        assert!(manager.is_empty());
        assert_eq!(manager.summary().source.as_ref(), Some(&config.session_file));
    }

    #[test]
    fn test_to_json() {
        let manager = RestoreManager::from_bytes(&SessionEncoder::latest().encode(&abc()[..1]).unwrap());
        let json: serde_json::Value = serde_json::from_str(&manager.to_json().unwrap()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["tabs"][1]["url"], "https://a.example/1");
    }

    #[test]
    fn test_independent_managers_on_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestoreManager>();

        let dir = TempDir::new().unwrap();
        let first = write(&dir, "one.dat", &SessionEncoder::latest().encode(&abc()).unwrap());
        let second = write(&dir, "two.dat", &SessionEncoder::new(1).unwrap().encode(&abc()[1..]).unwrap());

        let (one, two) = std::thread::scope(|scope| {
            let one = scope.spawn(|| RestoreManager::new(&first));
            let two = scope.spawn(|| RestoreManager::new(&second));
            (one.join().unwrap(), two.join().unwrap())
        });
        assert_eq!(one.window_count(), 3);
        assert_eq!(two.restore_data(), &abc()[1..]);
    }
}

#[cfg(test)]
mod proptests {
    use phoenix_codec::{ByteWriter, LATEST_VERSION};
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn arbitrary_bytes_never_break_invariants(
            version in 1u32..=LATEST_VERSION,
            body in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let mut writer = ByteWriter::new();
            writer.put_header(version).put_raw(&body);

            let manager = RestoreManager::from_bytes(writer.as_bytes());
            for window in manager.restore_data() {
                prop_assert!(window.tab_count() >= 1);
                prop_assert!(window.current_tab_index() < window.tab_count());
                let current = window.tabs().iter().filter(|t| t.is_current_in_window()).count();
                prop_assert_eq!(current, 1);
            }
        }
    }
}
