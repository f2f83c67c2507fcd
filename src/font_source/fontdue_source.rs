//! Outline font files rasterized with fontdue

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::metrics::{to_fixed, CharSize, VerticalMetrics};
use super::{FontSource, RasterizedGlyph};
use crate::core::errors::FontError;

/// A TTF/OTF font file at a fixed character size.
pub struct FontdueSource {
    name: String,
    font: fontdue::Font,
    size: CharSize,
}

impl FontdueSource {
    /// Load a font file from disk.
    pub fn load(path: impl AsRef<Path>, size: CharSize) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, bytes, size).map_err(|e| match e {
            FontError::Parse { message, .. } => FontError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse font data already in memory.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: Vec<u8>,
        size: CharSize,
    ) -> Result<Self, FontError> {
        let name = name.into();
        let settings = fontdue::FontSettings {
            scale: size.pixels(),
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|e| FontError::Parse {
            path: PathBuf::from(&name),
            message: e.to_string(),
        })?;
        debug!(
            "Loaded font {} with {} glyphs at {}px",
            name,
            font.glyph_count(),
            size.pixels()
        );
        Ok(Self { name, font, size })
    }

    fn glyph_index(&self, code_point: u32) -> Option<u16> {
        let ch = char::from_u32(code_point)?;
        match self.font.lookup_glyph_index(ch) {
            0 => None,
            index => Some(index),
        }
    }
}

impl FontSource for FontdueSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_glyph(&self, code_point: u32) -> bool {
        self.glyph_index(code_point).is_some()
    }

    fn render(&self, code_point: u32) -> Result<RasterizedGlyph, FontError> {
        let index = self
            .glyph_index(code_point)
            .ok_or(FontError::GlyphNotFound { code_point })?;
        let (metrics, bitmap) = self.font.rasterize_indexed(index, self.size.pixels());

        Ok(RasterizedGlyph {
            bitmap,
            width: metrics.width as u32,
            height: metrics.height as u32,
            advance_x: to_fixed(metrics.advance_width),
            bearing_left: metrics.xmin,
            bearing_top: metrics.ymin + metrics.height as i32,
        })
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        match self.font.horizontal_line_metrics(self.size.pixels()) {
            Some(line) => VerticalMetrics {
                line_height: to_fixed(line.new_line_size),
                ascender: to_fixed(line.ascent),
                descender: to_fixed(line.descent),
            },
            None => {
                warn!("Font {} has no horizontal line metrics", self.name);
                VerticalMetrics::default()
            }
        }
    }
}
