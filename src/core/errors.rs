//! Error types for the font conversion pipeline
//!
//! Every variant here is fatal: the pipeline either produces a complete
//! resource or nothing at all.

use std::fmt;
use std::path::PathBuf;

use crate::intervals::CodePointInterval;

/// Errors raised while building a bitmap font resource.
#[derive(Debug)]
pub enum FontError {
    /// No font in the stack supplies a glyph for this code point.
    GlyphNotFound { code_point: u32 },
    /// A caller-supplied interval could not be parsed as two integers.
    MalformedInterval { input: String, reason: String },
    /// Two intervals share at least one code point (strict mode only).
    OverlappingIntervals {
        first: CodePointInterval,
        second: CodePointInterval,
    },
    /// A font file could not be parsed by the rasterizer.
    Parse { path: PathBuf, message: String },
    /// A rasterized metric does not fit into its glyph table field.
    MetricOverflow {
        code_point: u32,
        field: &'static str,
        value: i64,
    },
    Io(std::io::Error),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlyphNotFound { code_point } => {
                write!(f, "code point {code_point} ({}) not found in font stack", describe(*code_point))
            }
            Self::MalformedInterval { input, reason } => {
                write!(f, "malformed interval '{input}': {reason}")
            }
            Self::OverlappingIntervals { first, second } => {
                write!(f, "intervals {first} and {second} overlap")
            }
            Self::Parse { path, message } => {
                write!(f, "failed to parse font {}: {message}", path.display())
            }
            Self::MetricOverflow {
                code_point,
                field,
                value,
            } => write!(
                f,
                "glyph {} has {field} = {value}, which does not fit the glyph table",
                describe(*code_point)
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FontError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Format a code point as `U+XXXX`.
pub fn describe(code_point: u32) -> String {
    format!("U+{code_point:04X}")
}
