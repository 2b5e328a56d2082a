//! Session encoder
//!
//! Writes windows in any registered format version. Fields a version has no
//! room for are left out: v1 loses zoom and favicons, v2 loses favicons.

use phoenix_records::WindowStateRecord;

use crate::error::EncodeError;
use crate::format::{latest, lookup, FormatDescriptor, Framing, END_OF_STREAM, WINDOW_MARKER};
use crate::writer::ByteWriter;

#[derive(Debug, Clone, Copy)]
pub struct SessionEncoder {
    format: &'static FormatDescriptor,
}

impl SessionEncoder {
    pub fn new(version: u32) -> Result<Self, EncodeError> {
        let format = lookup(version).ok_or(EncodeError::UnsupportedVersion(version))?;
        Ok(Self { format })
    }

    pub fn latest() -> Self {
        Self { format: latest() }
    }

    pub fn version(&self) -> u32 {
        self.format.version
    }

    pub fn encode(&self, windows: &[WindowStateRecord]) -> Result<Vec<u8>, EncodeError> {
        let mut writer = ByteWriter::new();
        writer.put_header(self.format.version);

        match self.format.framing {
            Framing::Streamed => {
                for window in windows {
                    writer.put_u8(WINDOW_MARKER);
                    self.write_window(&mut writer, window)?;
                }
                writer.put_u8(END_OF_STREAM);
            }
            Framing::LengthPrefixed => {
                writer.put_u32(count("window count", windows.len())?);
                for window in windows {
                    let mut body = ByteWriter::new();
                    self.write_window(&mut body, window)?;
                    writer.put_frame(body.as_bytes())?;
                }
            }
        }

        tracing::debug!(
            version = self.format.version,
            windows = windows.len(),
            size = writer.len(),
            "Encoded session"
        );

        Ok(writer.into_bytes())
    }

    fn write_window(&self, writer: &mut ByteWriter, window: &WindowStateRecord) -> Result<(), EncodeError> {
        let current = i32::try_from(window.current_tab_index()).map_err(|_| EncodeError::TooLarge {
            field: "current tab index",
            len: window.current_tab_index(),
        })?;

        writer.put_i32(current);
        writer.put_blob("window geometry", window.geometry())?;
        writer.put_u32(count("tab count", window.tab_count())?);
        for tab in window.tabs() {
            (self.format.encode_tab)(writer, tab)?;
        }
        Ok(())
    }
}

fn count(field: &'static str, len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::TooLarge { field, len })
}
