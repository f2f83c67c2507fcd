//! Per-glyph zlib compression
//!
//! Every glyph is compressed as its own zlib stream so the display
//! runtime can inflate a single glyph without touching its neighbours.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};

/// How packed glyph bytes are stored in the bitmap blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Packed bytes are stored as-is.
    #[default]
    None,
    /// Each glyph is a standalone zlib stream.
    Zlib,
}

impl Compression {
    pub fn from_flag(enabled: bool) -> Self {
        if enabled {
            Self::Zlib
        } else {
            Self::None
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Zlib
    }

    /// Encode one glyph's packed bytes.
    pub fn apply(self, packed: Vec<u8>) -> std::io::Result<Vec<u8>> {
        match self {
            Self::None => Ok(packed),
            Self::Zlib => compress(&packed),
        }
    }

    /// Decode one glyph's stored bytes back to packed form.
    pub fn reverse(self, stored: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            Self::None => Ok(stored.to_vec()),
            Self::Zlib => decompress(stored),
        }
    }
}

/// Compress `data` into a self-contained zlib stream.
pub fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inflate a zlib stream produced by [`compress`].
pub fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_roundtrip() {
        let packed: Vec<u8> = (0..512u32).map(|i| (i % 17) as u8 * 0x11).collect();
        let compressed = compress(&packed).unwrap();
        assert!(compressed.len() < packed.len());
        assert_eq!(decompress(&compressed).unwrap(), packed);
    }

    #[test]
    fn test_empty_input_still_produces_a_stream() {
        let compressed = compress(&[]).unwrap();
        assert!(!compressed.is_empty());
        assert!(decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_none_is_identity() {
        let packed = vec![0x12, 0x34, 0x56];
        assert_eq!(Compression::None.apply(packed.clone()).unwrap(), packed);
        assert_eq!(Compression::None.reverse(&packed).unwrap(), packed);
    }

    #[test]
    fn test_streams_decode_independently() {
        let a = Compression::Zlib.apply(vec![0xFF; 40]).unwrap();
        let b = Compression::Zlib.apply(vec![0x0F; 40]).unwrap();
        let mut blob = a.clone();
        blob.extend_from_slice(&b);
        assert_eq!(Compression::Zlib.reverse(&blob[a.len()..]).unwrap(), vec![0x0F; 40]);
        assert_eq!(Compression::Zlib.reverse(&blob[..a.len()]).unwrap(), vec![0xFF; 40]);
    }

    #[test]
    fn test_corrupt_stream_is_an_error() {
        assert!(decompress(&[0xDE, 0xAD, 0xBE, 0xEF]).is_err());
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(Compression::from_flag(true), Compression::Zlib);
        assert!(!Compression::from_flag(false).is_enabled());
    }
}
