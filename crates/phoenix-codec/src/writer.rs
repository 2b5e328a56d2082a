//! Big-endian writer producing session bytes
//!
//! Mirrors the reader primitive for primitive. Public so callers can emit
//! arbitrary records, malformed ones included.

use phoenix_records::OpaqueBlob;

use crate::error::EncodeError;
use crate::format::{NULL_LENGTH, SESSION_MAGIC};

#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Magic followed by the format version
    pub fn put_header(&mut self, version: u32) -> &mut Self {
        self.put_raw(&SESSION_MAGIC).put_u32(version)
    }

    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.put_u8(value as u8)
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.put_raw(&value.to_be_bytes())
    }

    pub fn put_i32(&mut self, value: i32) -> &mut Self {
        self.put_raw(&value.to_be_bytes())
    }

    pub fn put_f64(&mut self, value: f64) -> &mut Self {
        self.put_raw(&value.to_be_bytes())
    }

    pub fn put_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn put_string(&mut self, field: &'static str, value: &str) -> Result<&mut Self, EncodeError> {
        let len = length_prefix(field, value.len())?;
        Ok(self.put_u32(len).put_raw(value.as_bytes()))
    }

    pub fn put_null_string(&mut self) -> &mut Self {
        self.put_u32(NULL_LENGTH)
    }

    pub fn put_blob(&mut self, field: &'static str, blob: &OpaqueBlob) -> Result<&mut Self, EncodeError> {
        let len = length_prefix(field, blob.len())?;
        Ok(self.put_u32(blob.encoding()).put_u32(len).put_raw(blob.bytes()))
    }

    pub fn put_null_blob(&mut self) -> &mut Self {
        self.put_u32(0).put_u32(NULL_LENGTH)
    }

    /// Length-prefixed frame around `body`
    pub fn put_frame(&mut self, body: &[u8]) -> Result<&mut Self, EncodeError> {
        let len = u32::try_from(body.len()).map_err(|_| EncodeError::TooLarge {
            field: "window frame",
            len: body.len(),
        })?;
        Ok(self.put_u32(len).put_raw(body))
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// `NULL_LENGTH` is reserved, so the longest payload is one byte shorter.
fn length_prefix(field: &'static str, len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len)
        .ok()
        .filter(|&l| l != NULL_LENGTH)
        .ok_or(EncodeError::TooLarge { field, len })
}
