//! Font resource layout
//!
//! Walks the interval table in order, renders every code point through the
//! font stack and lays the encoded glyphs out in a single blob with a
//! parallel metrics table and interval index.

pub mod assembler;
pub mod resource;

pub use assembler::LayoutAssembler;
pub use resource::{FontResource, GlyphProps, UnicodeIntervalEntry};

use tracing::{debug, info};

use crate::core::errors::FontError;
use crate::font_source::FontStack;
use crate::glyph::Compression;
use crate::intervals::IntervalTable;

/// Character whose font supplies the font-wide vertical metrics.
///
/// The pipe usually reaches the true descender depth, whichever glyphs
/// happen to be exported.
pub const REFERENCE_CHAR: char = '|';

/// Options controlling a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub compression: Compression,
    pub reference_char: char,
    /// Reject overlapping intervals instead of warning about them.
    pub strict_intervals: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            compression: Compression::None,
            reference_char: REFERENCE_CHAR,
            strict_intervals: false,
        }
    }
}

/// Build a complete font resource.
///
/// Fails on the first code point no font in the stack can supply; no
/// partial resource is ever returned.
pub fn build_font(
    stack: &FontStack,
    table: &IntervalTable,
    options: &BuildOptions,
) -> Result<FontResource, FontError> {
    table.check(options.strict_intervals)?;
    debug!(
        "Building {} glyphs in {} intervals from {} font(s)",
        table.glyph_count(),
        table.len(),
        stack.len()
    );

    let mut assembler = LayoutAssembler::new(options.compression);
    for interval in table {
        assembler.begin_interval(*interval)?;
        for code_point in interval.code_points() {
            let resolved = stack.resolve_and_render(code_point)?;
            assembler.emit_glyph(code_point, &resolved.glyph)?;
        }
    }

    let metrics = stack.reference_metrics(options.reference_char)?;
    let resource = assembler.finish(metrics.to_pixels());

    info!("total {}", resource.packed_size);
    info!("compressed {}", resource.bitmap_blob.len());
    Ok(resource)
}
