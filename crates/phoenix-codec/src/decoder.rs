//! Session decoder
//!
//! Turns session file bytes into an ordered list of windows. Only a bad
//! header fails the whole file; damage after the header costs at most the
//! window it occurs in (framed formats) or the rest of the file from that
//! window on (streamed format).

use phoenix_records::{OpaqueBlob, WindowStateRecord};
use serde::Serialize;

use crate::error::{DecodeError, FormatError, WindowCorruptError};
use crate::format::{lookup, FormatDescriptor, Framing, END_OF_STREAM, SESSION_MAGIC, WINDOW_MARKER};
use crate::reader::ByteReader;
use crate::Result;

/// Smallest possible encoded tab (v1: two empty strings, a null blob, a bool)
const MIN_TAB_BYTES: usize = 4 + 4 + 8 + 1;

const DEFAULT_MAX_TABS_PER_WINDOW: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    /// Window count stated by the file (framed formats only)
    pub windows_declared: Option<usize>,
    /// Windows kept in the result
    pub windows_decoded: usize,
    /// Windows lost to damage
    pub windows_corrupt: usize,
    /// Windows that decoded cleanly but had no tabs
    pub windows_empty: usize,
    /// Decoding stopped before the end the file announced
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSession {
    pub format_version: u32,
    pub windows: Vec<WindowStateRecord>,
    pub stats: DecodeStats,
}

#[derive(Debug, Clone)]
pub struct SessionDecoder {
    /// Tab counts above this are treated as damage rather than allocated
    max_tabs_per_window: usize,
}

impl Default for SessionDecoder {
    fn default() -> Self {
        Self {
            max_tabs_per_window: DEFAULT_MAX_TABS_PER_WINDOW,
        }
    }
}

impl SessionDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tabs_per_window(mut self, limit: usize) -> Self {
        self.max_tabs_per_window = limit;
        self
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedSession> {
        let mut reader = ByteReader::new(bytes);
        let format = read_header(&mut reader)?;

        tracing::debug!(
            version = format.version,
            format = format.name,
            size = bytes.len(),
            "Decoding session"
        );

        let mut session = DecodedSession {
            format_version: format.version,
            windows: Vec::new(),
            stats: DecodeStats::default(),
        };

        match format.framing {
            Framing::Streamed => self.decode_streamed(format, &mut reader, &mut session),
            Framing::LengthPrefixed => self.decode_framed(format, &mut reader, &mut session),
        }

        session.stats.windows_decoded = session.windows.len();
        Ok(session)
    }

    fn decode_streamed(
        &self,
        format: &FormatDescriptor,
        reader: &mut ByteReader<'_>,
        session: &mut DecodedSession,
    ) {
        for index in 0.. {
            let offset = reader.offset();
            let marker = match reader.read_u8() {
                Ok(marker) => marker,
                // Input ending on a window boundary is a complete stream
                Err(_) => break,
            };

            let result = match marker {
                END_OF_STREAM => break,
                WINDOW_MARKER => self.decode_window(format, reader, index),
                marker => Err(WindowCorruptError {
                    index,
                    source: DecodeError::UnknownMarker { marker, offset },
                }),
            };

            if !session.accept(result) {
                // No boundary to resume from
                session.stats.truncated = true;
                break;
            }
        }
    }

    fn decode_framed(
        &self,
        format: &FormatDescriptor,
        reader: &mut ByteReader<'_>,
        session: &mut DecodedSession,
    ) {
        let declared = match reader.read_u32() {
            Ok(count) => count as usize,
            Err(_) => {
                tracing::warn!("Session ends before its window count");
                session.stats.truncated = true;
                return;
            }
        };
        session.stats.windows_declared = Some(declared);

        for index in 0..declared {
            if reader.is_empty() {
                tracing::warn!(
                    decoded = session.windows.len(),
                    declared,
                    "Session ends before all declared windows"
                );
                session.stats.truncated = true;
                break;
            }

            let mut frame = match reader.read_frame() {
                Ok(frame) => frame,
                Err(source) => {
                    // Frame runs past the end of input: nothing after it to resume at
                    session.accept(Err(WindowCorruptError { index, source }));
                    session.stats.truncated = true;
                    break;
                }
            };

            // A damaged body only costs this frame; the outer reader is
            // already positioned at the next one.
            session.accept(self.decode_window(format, &mut frame, index));
        }
    }

    fn decode_window(
        &self,
        format: &FormatDescriptor,
        reader: &mut ByteReader<'_>,
        index: usize,
    ) -> std::result::Result<Option<WindowStateRecord>, WindowCorruptError> {
        self.read_window(format, reader)
            .map_err(|source| WindowCorruptError { index, source })
    }

    fn read_window(
        &self,
        format: &FormatDescriptor,
        reader: &mut ByteReader<'_>,
    ) -> std::result::Result<Option<WindowStateRecord>, DecodeError> {
        let current_tab_index = reader.read_i32()?;
        let geometry = reader.read_blob()?.unwrap_or_else(OpaqueBlob::empty);
        let tab_count = reader.read_u32()?;

        if tab_count as usize > self.max_tabs_per_window {
            return Err(DecodeError::TooManyTabs {
                count: tab_count,
                limit: self.max_tabs_per_window,
            });
        }

        let capacity = (tab_count as usize).min(reader.remaining() / MIN_TAB_BYTES);
        let mut tabs = Vec::with_capacity(capacity);
        for _ in 0..tab_count {
            tabs.push((format.decode_tab)(reader)?);
        }

        Ok(WindowStateRecord::new(
            i64::from(current_tab_index),
            geometry,
            tabs,
        ))
    }
}

impl DecodedSession {
    /// Record the outcome of one window. Returns false if it was corrupt.
    fn accept(
        &mut self,
        result: std::result::Result<Option<WindowStateRecord>, WindowCorruptError>,
    ) -> bool {
        match result {
            Ok(Some(window)) => {
                tracing::debug!(
                    index = self.windows.len(),
                    tabs = window.tab_count(),
                    current = window.current_tab_index(),
                    "Decoded window"
                );
                self.windows.push(window);
                true
            }
            Ok(None) => {
                tracing::warn!("Dropping window without tabs");
                self.stats.windows_empty += 1;
                true
            }
            Err(error) => {
                tracing::warn!(window = error.index, error = %error.source, "Skipping corrupt window");
                self.stats.windows_corrupt += 1;
                false
            }
        }
    }
}

fn read_header(reader: &mut ByteReader<'_>) -> Result<&'static FormatDescriptor> {
    match reader.read_raw(SESSION_MAGIC.len()) {
        Ok(magic) if magic == SESSION_MAGIC => {}
        _ => return Err(FormatError::MissingMagic),
    }

    let version = reader
        .read_u32()
        .map_err(|_| FormatError::TruncatedHeader)?;

    lookup(version).ok_or(FormatError::UnsupportedVersion(version))
}
