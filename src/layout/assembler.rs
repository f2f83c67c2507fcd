//! Glyph blob and table assembly

use tracing::trace;

use super::resource::{FontResource, GlyphProps, UnicodeIntervalEntry};
use crate::core::errors::FontError;
use crate::font_source::metrics::norm_floor;
use crate::font_source::{PixelMetrics, RasterizedGlyph};
use crate::glyph::{pack_nibbles, Compression};
use crate::intervals::CodePointInterval;

/// Accumulates glyph bytes, glyph metrics and the interval index.
///
/// Glyphs must be emitted in table order: every interval is opened with
/// [`begin_interval`](Self::begin_interval) and followed by one
/// [`emit_glyph`](Self::emit_glyph) per code point.
#[derive(Debug, Default)]
pub struct LayoutAssembler {
    compression: Compression,
    blob: Vec<u8>,
    glyphs: Vec<GlyphProps>,
    intervals: Vec<UnicodeIntervalEntry>,
    next_glyph_offset: u32,
    packed_size: usize,
}

impl LayoutAssembler {
    pub fn new(compression: Compression) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }

    /// Record an interval index entry and reserve its glyph slots.
    pub fn begin_interval(
        &mut self,
        interval: CodePointInterval,
    ) -> Result<&UnicodeIntervalEntry, FontError> {
        let glyph_offset = self.next_glyph_offset;
        self.next_glyph_offset = glyph_offset.checked_add(interval.len()).ok_or(
            FontError::MetricOverflow {
                code_point: interval.start,
                field: "glyph_offset",
                value: glyph_offset as i64 + interval.len() as i64,
            },
        )?;
        self.intervals.push(UnicodeIntervalEntry {
            start: interval.start,
            end: interval.end,
            glyph_offset,
        });
        Ok(&self.intervals[self.intervals.len() - 1])
    }

    /// Pack, optionally compress and append one rendered glyph.
    pub fn emit_glyph(
        &mut self,
        code_point: u32,
        glyph: &RasterizedGlyph,
    ) -> Result<&GlyphProps, FontError> {
        let packed = pack_nibbles(&glyph.bitmap, glyph.width as usize, glyph.height as usize);
        let packed_len = packed.len();
        let stored = self.compression.apply(packed)?;

        let props = GlyphProps {
            width: narrow(code_point, "width", glyph.width)?,
            height: narrow(code_point, "height", glyph.height)?,
            advance_x: narrow(code_point, "advance_x", norm_floor(glyph.advance_x))?,
            left: narrow(code_point, "left", glyph.bearing_left)?,
            top: narrow(code_point, "top", glyph.bearing_top)?,
            compressed_size: narrow(code_point, "compressed_size", stored.len())?,
            data_offset: narrow(code_point, "data_offset", self.blob.len())?,
            code_point,
        };
        trace!(
            "Glyph U+{:04X} at offset {} ({} bytes)",
            code_point,
            props.data_offset,
            props.compressed_size
        );

        self.blob.extend_from_slice(&stored);
        self.packed_size += packed_len;
        self.glyphs.push(props);
        Ok(&self.glyphs[self.glyphs.len() - 1])
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn blob_len(&self) -> usize {
        self.blob.len()
    }

    /// Seal the accumulated tables into a resource.
    pub fn finish(self, metrics: PixelMetrics) -> FontResource {
        FontResource {
            interval_count: self.intervals.len() as u32,
            bitmap_blob: self.blob,
            glyphs: self.glyphs,
            intervals: self.intervals,
            compressed: self.compression.is_enabled(),
            line_height: metrics.line_height,
            ascender: metrics.ascender,
            descender: metrics.descender,
            packed_size: self.packed_size,
        }
    }
}

/// Convert a metric into its table field type, or report which field overflowed.
fn narrow<T, V>(code_point: u32, field: &'static str, value: V) -> Result<T, FontError>
where
    V: Copy + TryInto<T> + TryInto<i64>,
{
    TryInto::<T>::try_into(value).map_err(|_| FontError::MetricOverflow {
        code_point,
        field,
        value: TryInto::<i64>::try_into(value).unwrap_or(i64::MAX),
    })
}
