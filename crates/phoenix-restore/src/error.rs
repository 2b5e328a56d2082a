//! Restore error types
//!
//! None of these reach callers of `RestoreManager::new`; they are logged
//! and recorded in the restore summary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("Session file unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session format error: {0}")]
    Format(#[from] phoenix_codec::FormatError),

    #[error("Session file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
