//! Phoenix Session Records
//!
//! Immutable snapshots of the windows and tabs that were open when a
//! session was saved. Records are built once by the decoder and handed to
//! the UI layer read-only.

mod blob;
mod tab;
mod window;
mod zoom;

pub use blob::OpaqueBlob;
pub use tab::TabStateRecord;
pub use window::WindowStateRecord;
pub use zoom::ZoomLevel;
