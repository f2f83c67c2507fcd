//! Prioritized font stack resolution

use std::path::Path;

use tracing::{debug, info};

use super::{CharSize, FontSource, FontdueSource, RasterizedGlyph, VerticalMetrics};
use crate::core::errors::{describe, FontError};

/// A glyph together with the index of the source that rendered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGlyph {
    pub source_index: usize,
    pub glyph: RasterizedGlyph,
}

/// Font sources in descending priority.
#[derive(Default)]
pub struct FontStack {
    sources: Vec<Box<dyn FontSource>>,
}

impl FontStack {
    pub fn new(sources: Vec<Box<dyn FontSource>>) -> Self {
        Self { sources }
    }

    /// Load font files with fontdue, highest priority first.
    pub fn load<P: AsRef<Path>>(paths: &[P], size: CharSize) -> Result<Self, FontError> {
        let mut stack = Self::default();
        for path in paths {
            stack.push(FontdueSource::load(path, size)?);
        }
        Ok(stack)
    }

    /// Append a source with lower priority than all existing ones.
    pub fn push(&mut self, source: impl FontSource + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Find the first source covering `code_point`.
    ///
    /// Logs a diagnostic for every source skipped on the way.
    pub fn resolve(&self, code_point: u32) -> Result<(usize, &dyn FontSource), FontError> {
        for (index, source) in self.sources.iter().enumerate() {
            if source.has_glyph(code_point) {
                return Ok((index, source.as_ref()));
            }
            let next = self
                .sources
                .get(index + 1)
                .map_or("<none>", |s| s.name());
            info!(
                "Falling back to font {} ({}) for {}{}",
                index + 1,
                next,
                describe(code_point),
                char::from_u32(code_point)
                    .map(|c| format!(" '{c}'"))
                    .unwrap_or_default()
            );
        }
        Err(FontError::GlyphNotFound { code_point })
    }

    /// Render `code_point` with the first source that covers it.
    ///
    /// Returns an owned glyph, so consecutive calls never observe each
    /// other's rasterizer state.
    pub fn resolve_and_render(&self, code_point: u32) -> Result<ResolvedGlyph, FontError> {
        let (source_index, source) = self.resolve(code_point)?;
        let glyph = source.render(code_point)?;
        debug!(
            "Rendered {} from {}: {}x{}",
            describe(code_point),
            source.name(),
            glyph.width,
            glyph.height
        );
        Ok(ResolvedGlyph {
            source_index,
            glyph,
        })
    }

    /// Line metrics of the source that resolves `reference`.
    pub fn reference_metrics(&self, reference: char) -> Result<VerticalMetrics, FontError> {
        let (_, source) = self.resolve(reference as u32)?;
        Ok(source.vertical_metrics())
    }
}
