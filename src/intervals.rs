//! Unicode code point intervals selected for export
//!
//! The exported character set is a list of inclusive code point ranges:
//! a built-in table plus any ranges given on the command line or in the
//! config file. The merged list is sorted by start but never merged or
//! deduplicated. Overlapping ranges are reported and left alone, because
//! an overlap emits the same code point twice and silently repairing it
//! would change the glyph table the caller asked for.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::errors::FontError;

/// An inclusive range of Unicode code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CodePointInterval {
    pub start: u32,
    pub end: u32,
}

impl CodePointInterval {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A range holding a single code point.
    pub const fn single(code_point: u32) -> Self {
        Self::new(code_point, code_point)
    }

    /// Number of code points in the range, zero when `start > end`.
    pub fn len(&self) -> u32 {
        if self.is_inverted() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn code_points(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_inverted()
            && !other.is_inverted()
            && self.start <= other.end
            && other.start <= self.end
    }
}

impl fmt::Display for CodePointInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X},0x{:X}", self.start, self.end)
    }
}

/// Parses `min,max` where each bound is decimal or `0x`/`0o`/`0b` prefixed.
impl FromStr for CodePointInterval {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| FontError::MalformedInterval {
            input: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(malformed(format!(
                "expected two comma-separated integers, found {} value(s)",
                parts.len()
            )));
        }

        let start = parse_int(parts[0]).map_err(&malformed)?;
        let end = parse_int(parts[1]).map_err(&malformed)?;
        Ok(Self::new(start, end))
    }
}

/// Parse an integer literal with an optional radix prefix.
///
/// Accepts non-negative literals such as `42`, `0x2A`, `0o52` and
/// `0b101010`, with `_` allowed between digits. Decimal literals may not
/// have leading zeros.
pub fn parse_int(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0o" | "0O") => (&text[2..], 8),
        Some("0b" | "0B") => (&text[2..], 2),
        _ => (text, 10),
    };

    if digits.is_empty() {
        return Err(format!("'{text}' is not an integer"));
    }
    if !digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("'{text}' is not an integer"));
    }
    if digits.ends_with('_') || digits.contains("__") || (radix == 10 && digits.starts_with('_')) {
        return Err(format!("misplaced '_' in '{text}'"));
    }
    if radix == 10 && digits.starts_with('0') && digits.chars().any(|c| c != '0' && c != '_') {
        return Err(format!("leading zeros are not allowed in decimal literal '{text}'"));
    }

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    u32::from_str_radix(&cleaned, radix).map_err(|e| format!("'{text}': {e}"))
}

/// Built-in export set: hyphen, digits, basic Latin letters and the
/// accented letters of the Czech alphabet.
pub const BUILTIN_INTERVALS: &[CodePointInterval] = &[
    CodePointInterval::single(0x002D), // -
    CodePointInterval::new(0x0030, 0x0039),
    CodePointInterval::new(0x0041, 0x005A),
    CodePointInterval::new(0x0061, 0x007A),
    CodePointInterval::single(0x00C1), // Á
    CodePointInterval::single(0x00C9), // É
    CodePointInterval::single(0x00CD), // Í
    CodePointInterval::single(0x00D3), // Ó
    CodePointInterval::single(0x00DA), // Ú
    CodePointInterval::single(0x00DD), // Ý
    CodePointInterval::single(0x00E1), // á
    CodePointInterval::single(0x00E9), // é
    CodePointInterval::single(0x00ED), // í
    CodePointInterval::single(0x00F3), // ó
    CodePointInterval::single(0x00FA), // ú
    CodePointInterval::single(0x00FD), // ý
    CodePointInterval::new(0x010C, 0x010F), // Č č Ď ď
    CodePointInterval::new(0x011A, 0x011B), // Ě ě
    CodePointInterval::new(0x0147, 0x0148), // Ň ň
    CodePointInterval::new(0x0158, 0x0159), // Ř ř
    CodePointInterval::new(0x0160, 0x0161), // Š š
    CodePointInterval::new(0x0164, 0x0165), // Ť ť
    CodePointInterval::new(0x016E, 0x016F), // Ů ů
    CodePointInterval::new(0x017D, 0x017E), // Ž ž
];

/// The sorted list of intervals a font resource is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalTable {
    intervals: Vec<CodePointInterval>,
}

impl IntervalTable {
    /// Merge built-in and additional intervals, sorted by `(start, end)`.
    pub fn new(
        builtin: &[CodePointInterval],
        additional: impl IntoIterator<Item = CodePointInterval>,
    ) -> Self {
        let mut intervals: Vec<CodePointInterval> = builtin.to_vec();
        intervals.extend(additional);
        intervals.sort();
        Self { intervals }
    }

    /// The built-in table plus `additional`.
    pub fn with_builtin(additional: impl IntoIterator<Item = CodePointInterval>) -> Self {
        Self::new(BUILTIN_INTERVALS, additional)
    }

    /// Parse `min,max` strings and merge them with the built-in table.
    pub fn from_args<S: AsRef<str>>(additional: &[S]) -> Result<Self, FontError> {
        let parsed = additional
            .iter()
            .map(|s| s.as_ref().parse::<CodePointInterval>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_builtin(parsed))
    }

    pub fn intervals(&self) -> &[CodePointInterval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CodePointInterval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total number of glyph slots across all intervals.
    pub fn glyph_count(&self) -> usize {
        self.intervals.iter().map(|i| i.len() as usize).sum()
    }

    /// Every pair of intervals sharing a code point, in table order.
    pub fn overlaps(&self) -> Vec<(CodePointInterval, CodePointInterval)> {
        let mut found = Vec::new();
        let mut widest: Option<CodePointInterval> = None;
        for interval in self.intervals.iter().filter(|i| !i.is_inverted()) {
            if let Some(prev) = widest {
                if prev.overlaps(interval) {
                    found.push((prev, *interval));
                }
                if interval.end > prev.end {
                    widest = Some(*interval);
                }
            } else {
                widest = Some(*interval);
            }
        }
        found
    }

    /// Report overlapping and inverted intervals.
    ///
    /// Problems are logged as warnings. In strict mode the first overlap
    /// is returned as an error instead.
    pub fn check(&self, strict: bool) -> Result<(), FontError> {
        for interval in self.intervals.iter().filter(|i| i.is_inverted()) {
            warn!("Interval {} has start > end and exports no glyphs", interval);
        }

        let overlaps = self.overlaps();
        if strict {
            if let Some(&(first, second)) = overlaps.first() {
                return Err(FontError::OverlappingIntervals { first, second });
            }
        }
        for (first, second) in overlaps {
            warn!(
                "Intervals {} and {} overlap; shared code points will be exported twice",
                first, second
            );
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a IntervalTable {
    type Item = &'a CodePointInterval;
    type IntoIter = std::slice::Iter<'a, CodePointInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_prefixes() {
        assert_eq!(parse_int("48"), Ok(48));
        assert_eq!(parse_int("0x30"), Ok(0x30));
        assert_eq!(parse_int("0X1F600"), Ok(0x1F600));
        assert_eq!(parse_int("0o60"), Ok(0o60));
        assert_eq!(parse_int("0b110000"), Ok(48));
        assert_eq!(parse_int(" 0x2d "), Ok(0x2D));
        assert_eq!(parse_int("1_000"), Ok(1000));
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("000"), Ok(0));
    }

    #[test]
    fn test_parse_int_rejects_garbage() {
        assert!(parse_int("").is_err());
        assert!(parse_int("0x").is_err());
        assert!(parse_int("abc").is_err());
        assert!(parse_int("-5").is_err());
        assert!(parse_int("0x+5").is_err());
        assert!(parse_int("010").is_err());
        assert!(parse_int("1__0").is_err());
        assert!(parse_int("10_").is_err());
        assert!(parse_int("0o9").is_err());
    }

    #[test]
    fn test_interval_from_str() {
        let interval: CodePointInterval = "0x30,0x39".parse().unwrap();
        assert_eq!(interval, CodePointInterval::new(0x30, 0x39));
        assert_eq!(interval.len(), 10);

        let interval: CodePointInterval = "160, 255".parse().unwrap();
        assert_eq!(interval, CodePointInterval::new(160, 255));
    }

    #[test]
    fn test_interval_from_str_malformed() {
        for input in ["0x30", "1,2,3", "a,b", "0x30;0x39", ""] {
            match input.parse::<CodePointInterval>() {
                Err(FontError::MalformedInterval { input: got, .. }) => assert_eq!(got, input),
                other => panic!("expected malformed interval for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_inverted_interval_is_empty() {
        let interval = CodePointInterval::new(0x40, 0x30);
        assert!(interval.is_inverted());
        assert_eq!(interval.len(), 0);
        assert_eq!(interval.code_points().count(), 0);
    }

    #[test]
    fn test_table_sorted_by_start() {
        let table = IntervalTable::new(
            &[CodePointInterval::new(0x61, 0x7A), CodePointInterval::single(0x2D)],
            [CodePointInterval::new(0x30, 0x39), CodePointInterval::new(0x20, 0x20)],
        );
        let starts: Vec<u32> = table.iter().map(|i| i.start).collect();
        assert_eq!(starts, vec![0x20, 0x2D, 0x30, 0x61]);
        assert_eq!(table.glyph_count(), 1 + 1 + 10 + 26);
    }

    #[test]
    fn test_builtin_table_is_sorted_and_disjoint() {
        let table = IntervalTable::with_builtin([]);
        assert_eq!(table.intervals(), BUILTIN_INTERVALS);
        assert!(table.overlaps().is_empty());
        assert!(table.check(true).is_ok());
    }

    #[test]
    fn test_overlaps_are_kept_and_reported() {
        let table = IntervalTable::with_builtin([CodePointInterval::new(0x35, 0x45)]);
        // Nothing is merged away.
        assert_eq!(table.len(), BUILTIN_INTERVALS.len() + 1);

        let overlaps = table.overlaps();
        assert_eq!(overlaps.len(), 2);
        assert_eq!(overlaps[0], (CodePointInterval::new(0x30, 0x39), CodePointInterval::new(0x35, 0x45)));
        assert_eq!(overlaps[1], (CodePointInterval::new(0x35, 0x45), CodePointInterval::new(0x41, 0x5A)));

        assert!(table.check(false).is_ok());
        assert!(matches!(
            table.check(true),
            Err(FontError::OverlappingIntervals { .. })
        ));
    }

    #[test]
    fn test_duplicate_interval_overlaps_itself() {
        let table = IntervalTable::new(&[], [CodePointInterval::single(0xC1), CodePointInterval::single(0xC1)]);
        assert_eq!(table.overlaps().len(), 1);
    }

    #[test]
    fn test_from_args_propagates_parse_errors() {
        assert!(IntervalTable::from_args(&["0x2190,0x21FF"]).is_ok());
        assert!(matches!(
            IntervalTable::from_args(&["0x2190"]),
            Err(FontError::MalformedInterval { .. })
        ));
    }
}
