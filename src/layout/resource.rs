//! The assembled bitmap font resource
//!
//! Lookup follows the same steps as the display runtime: binary search
//! the interval index, add the offset within the interval to the
//! interval's first glyph index, then read the glyph's bytes from the
//! blob.

use serde::{Deserialize, Serialize};

use crate::core::errors::FontError;
use crate::glyph::{unpack_nibbles, Compression};

/// Metrics and blob location of one exported glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphProps {
    pub width: u16,
    pub height: u16,
    /// Horizontal advance in whole pixels.
    pub advance_x: i16,
    pub left: i16,
    pub top: i16,
    /// Number of bytes stored in the blob, compressed or not.
    pub compressed_size: u32,
    /// Absolute offset of the glyph's bytes in the blob.
    pub data_offset: u32,
    pub code_point: u32,
}

impl GlyphProps {
    /// Blob byte range of this glyph.
    pub fn data_range(&self) -> std::ops::Range<usize> {
        let start = self.data_offset as usize;
        start..start + self.compressed_size as usize
    }
}

/// One entry of the interval index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnicodeIntervalEntry {
    pub start: u32,
    pub end: u32,
    /// Index of the interval's first code point in the glyph table.
    pub glyph_offset: u32,
}

/// Everything the display runtime needs to draw the exported glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontResource {
    pub bitmap_blob: Vec<u8>,
    pub glyphs: Vec<GlyphProps>,
    pub intervals: Vec<UnicodeIntervalEntry>,
    pub interval_count: u32,
    pub compressed: bool,
    pub line_height: i32,
    pub ascender: i32,
    pub descender: i32,
    /// Total size of all packed glyphs before compression.
    pub packed_size: usize,
}

impl FontResource {
    pub fn compression(&self) -> Compression {
        Compression::from_flag(self.compressed)
    }

    /// Index into `glyphs` for `code_point`, if it was exported.
    pub fn glyph_index(&self, code_point: u32) -> Option<usize> {
        let candidates = self.intervals.partition_point(|e| e.start <= code_point);
        let entry = self.intervals[..candidates].last()?;
        if code_point > entry.end {
            return None;
        }
        let index = entry.glyph_offset as usize + (code_point - entry.start) as usize;
        (index < self.glyphs.len()).then_some(index)
    }

    pub fn glyph(&self, code_point: u32) -> Option<&GlyphProps> {
        self.glyph_index(code_point).map(|i| &self.glyphs[i])
    }

    /// The glyph's bytes exactly as stored in the blob.
    pub fn glyph_data(&self, glyph: &GlyphProps) -> Option<&[u8]> {
        self.bitmap_blob.get(glyph.data_range())
    }

    /// The glyph's packed 4-bit rows, decompressed if needed.
    pub fn glyph_packed(&self, glyph: &GlyphProps) -> Result<Vec<u8>, FontError> {
        let stored = self.glyph_data(glyph).ok_or_else(|| {
            FontError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "glyph data {:?} lies outside the {} byte blob",
                    glyph.data_range(),
                    self.bitmap_blob.len()
                ),
            ))
        })?;
        Ok(self.compression().reverse(stored)?)
    }

    /// The glyph as an 8-bit bitmap with 4-bit precision.
    pub fn glyph_bitmap(&self, glyph: &GlyphProps) -> Result<Vec<u8>, FontError> {
        let packed = self.glyph_packed(glyph)?;
        Ok(unpack_nibbles(
            &packed,
            glyph.width as usize,
            glyph.height as usize,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(code_point: u32, data_offset: u32, compressed_size: u32) -> GlyphProps {
        GlyphProps {
            width: 2,
            height: 1,
            advance_x: 3,
            left: 0,
            top: 1,
            compressed_size,
            data_offset,
            code_point,
        }
    }

    fn resource() -> FontResource {
        FontResource {
            bitmap_blob: vec![0x21, 0x43, 0x65],
            glyphs: vec![props(0x30, 0, 1), props(0x31, 1, 1), props(0x41, 2, 1)],
            intervals: vec![
                UnicodeIntervalEntry {
                    start: 0x30,
                    end: 0x31,
                    glyph_offset: 0,
                },
                UnicodeIntervalEntry {
                    start: 0x41,
                    end: 0x41,
                    glyph_offset: 2,
                },
            ],
            interval_count: 2,
            compressed: false,
            line_height: 10,
            ascender: 8,
            descender: -2,
            packed_size: 3,
        }
    }

    #[test]
    fn test_lookup_hits() {
        let resource = resource();
        assert_eq!(resource.glyph(0x30).unwrap().code_point, 0x30);
        assert_eq!(resource.glyph(0x31).unwrap().code_point, 0x31);
        assert_eq!(resource.glyph(0x41).unwrap().code_point, 0x41);
    }

    #[test]
    fn test_lookup_misses() {
        let resource = resource();
        assert!(resource.glyph(0x2F).is_none());
        assert!(resource.glyph(0x32).is_none());
        assert!(resource.glyph(0x42).is_none());
        assert!(resource.glyph(0).is_none());
    }

    #[test]
    fn test_glyph_bitmap_unpacks() {
        let resource = resource();
        let glyph = *resource.glyph(0x31).unwrap();
        assert_eq!(resource.glyph_data(&glyph), Some(&[0x43][..]));
        assert_eq!(resource.glyph_bitmap(&glyph).unwrap(), vec![0x30, 0x40]);
    }

    #[test]
    fn test_out_of_bounds_glyph_data() {
        let resource = resource();
        let glyph = props(0x99, 2, 5);
        assert!(resource.glyph_data(&glyph).is_none());
        assert!(resource.glyph_packed(&glyph).is_err());
    }
}
