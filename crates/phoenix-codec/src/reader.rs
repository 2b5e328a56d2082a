//! Bounds-checked big-endian reader over a byte slice

use phoenix_records::OpaqueBlob;

use crate::error::DecodeError;
use crate::format::NULL_LENGTH;

pub(crate) struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
    /// Offset of `buf[0]` in the whole file, for error messages
    base: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0, base: 0 }
    }

    /// Offset into the whole file
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset(),
                needed: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_be_bytes(self.take_array()?))
    }

    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.take(n)
    }

    /// Length-prefixed UTF-8. A null string reads as empty.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.read_u32()?;
        if len == NULL_LENGTH {
            return Ok(String::new());
        }
        let offset = self.offset();
        let bytes = self.take(len as usize)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field, offset })
    }

    /// Encoding tag plus length-prefixed payload. `None` for a null blob.
    pub fn read_blob(&mut self) -> Result<Option<OpaqueBlob>, DecodeError> {
        let encoding = self.read_u32()?;
        let len = self.read_u32()?;
        if len == NULL_LENGTH {
            return Ok(None);
        }
        let bytes = self.take(len as usize)?;
        Ok(Some(OpaqueBlob::new(encoding, bytes.to_vec())))
    }

    /// Split off a length-prefixed frame as its own reader.
    ///
    /// The outer reader moves past the frame even if its contents later
    /// turn out to be corrupt, which is what lets decoding resume at the
    /// next frame.
    pub fn read_frame(&mut self) -> Result<ByteReader<'a>, DecodeError> {
        let len = self.read_u32()? as usize;
        let base = self.offset();
        let buf = self.take(len)?;
        Ok(ByteReader { buf, pos: 0, base })
    }
}
