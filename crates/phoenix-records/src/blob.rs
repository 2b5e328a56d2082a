//! Opaque byte payloads (navigation history, window geometry, favicons)
//!
//! The subsystem that produced a blob owns its layout. Session records only
//! carry the bytes together with the encoding version they were written with.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct OpaqueBlob {
    /// Encoding version declared by the producer
    encoding: u32,
    /// Raw payload, never interpreted here
    bytes: Vec<u8>,
}

impl OpaqueBlob {
    pub fn new(encoding: u32, bytes: Vec<u8>) -> Self {
        Self { encoding, bytes }
    }

    /// A blob with no payload and encoding version 0
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn encoding(&self) -> u32 {
        self.encoding
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_passes_bytes_through() {
        let blob = OpaqueBlob::new(7, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(blob.encoding(), 7);
        assert_eq!(blob.bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(blob.len(), 4);
        assert!(!blob.is_empty());
        assert_eq!(blob.into_bytes(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_empty_blob() {
        let blob = OpaqueBlob::empty();
        assert!(blob.is_empty());
        assert_eq!(blob.encoding(), 0);
        assert_eq!(blob, OpaqueBlob::new(0, Vec::new()));
    }
}
