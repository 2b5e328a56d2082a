//! Phoenix Session Codec
//!
//! Reads the versioned session file into window/tab records and writes it
//! back. Damage is contained per window: a corrupt window is skipped (or
//! ends decoding when the format has no window boundaries to resume from)
//! while every window decoded before it is kept.

mod decoder;
mod encoder;
mod error;
mod format;
mod reader;
mod writer;

pub use decoder::{DecodeStats, DecodedSession, SessionDecoder};
pub use encoder::SessionEncoder;
pub use error::{DecodeError, EncodeError, FormatError};
pub use format::{
    lookup, supported_versions, FormatDescriptor, Framing, END_OF_STREAM, LATEST_VERSION,
    NULL_LENGTH, SESSION_MAGIC, WINDOW_MARKER,
};
pub use writer::ByteWriter;

pub type Result<T> = std::result::Result<T, FormatError>;
