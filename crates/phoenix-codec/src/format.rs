//! Session format versions
//!
//! Every version the codec understands has one entry in `REGISTRY`. An
//! entry says how windows are delimited and which routine reads (and
//! writes) a tab in that version. Supporting a new version means adding
//! routines and one entry; older entries stay untouched.
//!
//! ```text
//! v1  streamed windows   url, title, history, pinned
//! v2  framed windows     url, title, history, zoom, pinned
//! v3  framed windows     url, title, history, zoom, pinned, icon
//! ```

use phoenix_records::{TabStateRecord, ZoomLevel};

use crate::error::{DecodeError, EncodeError};
use crate::reader::ByteReader;
use crate::writer::ByteWriter;

pub const SESSION_MAGIC: [u8; 4] = *b"PHXS";

/// Length value marking a null string or blob
pub const NULL_LENGTH: u32 = u32::MAX;

/// Introduces a window in streamed formats
pub const WINDOW_MARKER: u8 = 0x57;

/// Ends the window list in streamed formats
pub const END_OF_STREAM: u8 = 0x00;

pub const LATEST_VERSION: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Windows follow each other behind a marker byte, list closed by
    /// `END_OF_STREAM`. Nothing to resynchronize on after damage.
    Streamed,
    /// Window count, then one length-prefixed frame per window.
    LengthPrefixed,
}

type DecodeTabFn = fn(&mut ByteReader<'_>) -> Result<TabStateRecord, DecodeError>;
type EncodeTabFn = fn(&mut ByteWriter, &TabStateRecord) -> Result<(), EncodeError>;

#[derive(Clone, Copy)]
pub struct FormatDescriptor {
    pub version: u32,
    pub name: &'static str,
    pub framing: Framing,
    pub(crate) decode_tab: DecodeTabFn,
    pub(crate) encode_tab: EncodeTabFn,
}

impl std::fmt::Debug for FormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatDescriptor")
            .field("version", &self.version)
            .field("name", &self.name)
            .field("framing", &self.framing)
            .finish_non_exhaustive()
    }
}

static REGISTRY: [FormatDescriptor; 3] = [
    FormatDescriptor {
        version: 1,
        name: "streamed",
        framing: Framing::Streamed,
        decode_tab: decode_tab_v1,
        encode_tab: encode_tab_v1,
    },
    FormatDescriptor {
        version: 2,
        name: "framed",
        framing: Framing::LengthPrefixed,
        decode_tab: decode_tab_v2,
        encode_tab: encode_tab_v2,
    },
    FormatDescriptor {
        version: 3,
        name: "framed+icon",
        framing: Framing::LengthPrefixed,
        decode_tab: decode_tab_v3,
        encode_tab: encode_tab_v3,
    },
];

pub fn lookup(version: u32) -> Option<&'static FormatDescriptor> {
    REGISTRY.iter().find(|format| format.version == version)
}

/// Newest registered format, used when writing
pub(crate) fn latest() -> &'static FormatDescriptor {
    &REGISTRY[REGISTRY.len() - 1]
}

pub fn supported_versions() -> impl Iterator<Item = u32> {
    REGISTRY.iter().map(|format| format.version)
}

fn decode_common(reader: &mut ByteReader<'_>) -> Result<TabStateRecord, DecodeError> {
    let url = reader.read_string("url")?;
    let title = reader.read_string("title")?;
    let history = reader.read_blob()?.unwrap_or_default();
    Ok(TabStateRecord::new(url, title).with_history(history))
}

fn decode_tab_v1(reader: &mut ByteReader<'_>) -> Result<TabStateRecord, DecodeError> {
    let tab = decode_common(reader)?;
    let pinned = reader.read_bool()?;
    Ok(tab.with_pinned(pinned))
}

fn decode_tab_v2(reader: &mut ByteReader<'_>) -> Result<TabStateRecord, DecodeError> {
    let tab = decode_common(reader)?;
    let zoom = ZoomLevel::from_raw(reader.read_f64()?);
    let pinned = reader.read_bool()?;
    Ok(tab.with_zoom(zoom).with_pinned(pinned))
}

fn decode_tab_v3(reader: &mut ByteReader<'_>) -> Result<TabStateRecord, DecodeError> {
    let tab = decode_tab_v2(reader)?;
    Ok(match reader.read_blob()? {
        Some(icon) => tab.with_icon(icon),
        None => tab,
    })
}

fn encode_common(writer: &mut ByteWriter, tab: &TabStateRecord) -> Result<(), EncodeError> {
    writer.put_string("url", tab.url())?;
    writer.put_string("title", tab.title())?;
    writer.put_blob("history", tab.history())?;
    Ok(())
}

fn encode_tab_v1(writer: &mut ByteWriter, tab: &TabStateRecord) -> Result<(), EncodeError> {
    encode_common(writer, tab)?;
    writer.put_bool(tab.is_pinned());
    Ok(())
}

fn encode_tab_v2(writer: &mut ByteWriter, tab: &TabStateRecord) -> Result<(), EncodeError> {
    encode_common(writer, tab)?;
    writer.put_f64(tab.zoom().factor()).put_bool(tab.is_pinned());
    Ok(())
}

fn encode_tab_v3(writer: &mut ByteWriter, tab: &TabStateRecord) -> Result<(), EncodeError> {
    encode_tab_v2(writer, tab)?;
    match tab.icon() {
        Some(icon) => {
            writer.put_blob("icon", icon)?;
        }
        None => {
            writer.put_null_blob();
        }
    }
    Ok(())
}
