//! Font metrics and 26.6 fixed point conversions
//!
//! Rasterizer metrics are carried in 26.6 fixed point (the low six bits
//! are the fraction). The emitted resource stores whole pixels, rounding
//! so that line height and ascender are never under-estimated while the
//! descender is never over-estimated in magnitude.

use serde::{Deserialize, Serialize};

/// Number of fractional units per pixel in 26.6 fixed point.
pub const FIXED_ONE: i32 = 1 << 6;

/// Display density assumed for e-paper panels, in both axes.
pub const DEFAULT_DPI: u32 = 150;

/// Floor a 26.6 value to whole pixels.
pub fn norm_floor(value: i32) -> i32 {
    value.div_euclid(FIXED_ONE)
}

/// Ceil a 26.6 value to whole pixels.
pub fn norm_ceil(value: i32) -> i32 {
    -(-value).div_euclid(FIXED_ONE)
}

/// Convert fractional pixels to 26.6 fixed point, rounding to nearest.
pub fn to_fixed(pixels: f32) -> i32 {
    (pixels * FIXED_ONE as f32).round() as i32
}

/// Requested character size: point size at a display density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharSize {
    pub points: u32,
    pub dpi: u32,
}

impl CharSize {
    pub fn new(points: u32) -> Self {
        Self {
            points,
            dpi: DEFAULT_DPI,
        }
    }

    /// Character size in 26.6 points.
    pub fn fixed_points(&self) -> i64 {
        (self.points as i64) << 6
    }

    /// Pixel size (em height) in 26.6 fixed point.
    pub fn fixed_pixels(&self) -> i64 {
        self.fixed_points() * self.dpi as i64 / 72
    }

    /// Pixel size as a float for rasterizers that take one.
    pub fn pixels(&self) -> f32 {
        self.fixed_pixels() as f32 / FIXED_ONE as f32
    }
}

/// Font-wide vertical metrics in 26.6 fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalMetrics {
    /// Baseline to baseline distance.
    pub line_height: i32,
    /// Distance from baseline to the top of the tallest glyphs.
    pub ascender: i32,
    /// Distance from baseline to the bottom of the deepest glyphs (negative).
    pub descender: i32,
}

impl VerticalMetrics {
    /// Whole pixel metrics as stored in the resource.
    pub fn to_pixels(&self) -> PixelMetrics {
        PixelMetrics {
            line_height: norm_ceil(self.line_height),
            ascender: norm_ceil(self.ascender),
            descender: norm_floor(self.descender),
        }
    }
}

/// Vertical metrics in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelMetrics {
    pub line_height: i32,
    pub ascender: i32,
    pub descender: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_floor() {
        assert_eq!(norm_floor(1600), 25);
        assert_eq!(norm_floor(1601), 25);
        assert_eq!(norm_floor(1663), 25);
        assert_eq!(norm_floor(0), 0);
        assert_eq!(norm_floor(-1), -1);
        assert_eq!(norm_floor(-64), -1);
        assert_eq!(norm_floor(-65), -2);
    }

    #[test]
    fn test_norm_ceil() {
        assert_eq!(norm_ceil(1600), 25);
        assert_eq!(norm_ceil(1601), 26);
        assert_eq!(norm_ceil(0), 0);
        assert_eq!(norm_ceil(-1), 0);
        assert_eq!(norm_ceil(-64), -1);
        assert_eq!(norm_ceil(-65), -1);
    }

    #[test]
    fn test_advance_floor_is_idempotent() {
        for raw in [0, 63, 64, 1600, 1601, 4095] {
            let once = norm_floor(raw);
            assert_eq!(norm_floor(once * FIXED_ONE), once);
        }
    }

    #[test]
    fn test_char_size_at_150_dpi() {
        let size = CharSize::new(12);
        assert_eq!(size.fixed_points(), 768);
        assert_eq!(size.fixed_pixels(), 1600);
        assert_eq!(size.pixels(), 25.0);
    }

    #[test]
    fn test_vertical_metrics_rounding() {
        let metrics = VerticalMetrics {
            line_height: 1900,
            ascender: 1480,
            descender: -390,
        };
        assert_eq!(
            metrics.to_pixels(),
            PixelMetrics {
                line_height: 30,
                ascender: 24,
                descender: -7,
            }
        );
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(25.0), 1600);
        assert_eq!(to_fixed(0.5), 32);
        assert_eq!(to_fixed(-6.1), -390);
    }
}
