//! Phoenix Session Restore
//!
//! Rebuilds the list of previously open windows and tabs from the saved
//! session file. Restoring is best effort: a missing, unreadable or
//! damaged file yields fewer windows (possibly none), never an error.

mod config;
mod error;
mod manager;
mod summary;

pub use config::{RestoreConfig, BACKUP_FILE_NAME, DEFAULT_MAX_FILE_BYTES, SESSION_FILE_NAME};
pub use error::RestoreError;
pub use manager::RestoreManager;
pub use summary::RestoreSummary;

// Re-export the record types the UI layer consumes
pub use phoenix_codec::{DecodeStats, FormatError};
pub use phoenix_records::{OpaqueBlob, TabStateRecord, WindowStateRecord, ZoomLevel};

pub type Result<T> = std::result::Result<T, RestoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A host application may already have installed a subscriber
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
