//! Codec error types

use thiserror::Error;

/// The file as a whole cannot be read as a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Missing session file magic")]
    MissingMagic,

    #[error("Session header truncated before the format version")]
    TruncatedHeader,

    #[error("Unsupported session format version: {0}")]
    UnsupportedVersion(u32),
}

/// A single field could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Invalid UTF-8 in {field} at offset {offset}")]
    InvalidUtf8 { field: &'static str, offset: usize },

    #[error("Unknown window marker {marker:#04x} at offset {offset}")]
    UnknownMarker { marker: u8, offset: usize },

    #[error("Window declares {count} tabs, limit is {limit}")]
    TooManyTabs { count: u32, limit: usize },
}

/// Damage confined to one window. Never leaves the decoder.
#[derive(Error, Debug)]
#[error("Window {index} is corrupt: {source}")]
pub(crate) struct WindowCorruptError {
    pub index: usize,
    #[source]
    pub source: DecodeError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Unsupported session format version: {0}")]
    UnsupportedVersion(u32),

    #[error("{field} is too large to encode ({len})")]
    TooLarge { field: &'static str, len: usize },
}
