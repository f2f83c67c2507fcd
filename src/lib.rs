//! fontconvert
pub mod core;
pub mod emit;
pub mod font_source;
pub mod glyph;
pub mod intervals;
pub mod layout;
pub mod logging;

pub use crate::core::errors::FontError;
pub use font_source::{FontSource, FontStack, RasterizedGlyph};
pub use intervals::{CodePointInterval, IntervalTable};
pub use layout::{build_font, BuildOptions, FontResource, GlyphProps, UnicodeIntervalEntry};
