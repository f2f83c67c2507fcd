//! Font sources and the prioritized font stack
//!
//! A font source is one rasterizer backend at a fixed pixel size. Sources
//! are stacked in priority order and each code point is rendered by the
//! first source that covers it.

pub mod fontdue_source;
pub mod metrics;
pub mod stack;

pub use fontdue_source::FontdueSource;
pub use metrics::{CharSize, PixelMetrics, VerticalMetrics, DEFAULT_DPI};
pub use stack::{FontStack, ResolvedGlyph};

use crate::core::errors::FontError;

/// A single glyph rendered to an 8-bit greyscale coverage bitmap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterizedGlyph {
    /// Row-major samples, `width * height` bytes.
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Horizontal advance in 26.6 fixed point.
    pub advance_x: i32,
    /// Offset from the pen position to the left edge of the bitmap.
    pub bearing_left: i32,
    /// Offset from the baseline to the top row of the bitmap (up is positive).
    pub bearing_top: i32,
}

/// A rasterizer backend configured at a fixed pixel size.
pub trait FontSource {
    /// Human readable name for diagnostics (usually the file name).
    fn name(&self) -> &str;

    /// Whether this source has a renderable glyph for `code_point`.
    fn has_glyph(&self, code_point: u32) -> bool;

    /// Render the glyph for `code_point`.
    ///
    /// Only called after `has_glyph` returned true for the same code point.
    fn render(&self, code_point: u32) -> Result<RasterizedGlyph, FontError>;

    /// Font-wide line metrics at the configured size.
    fn vertical_metrics(&self) -> VerticalMetrics;
}

impl<T: FontSource + ?Sized> FontSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn has_glyph(&self, code_point: u32) -> bool {
        (**self).has_glyph(code_point)
    }

    fn render(&self, code_point: u32) -> Result<RasterizedGlyph, FontError> {
        (**self).render(code_point)
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        (**self).vertical_metrics()
    }
}
