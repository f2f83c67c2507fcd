//! Command line interface for fontconvert
//!
//! Handles parsing command line arguments and provides validation for
//! user inputs before any font file is opened.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::emit::OutputFormat;

/// fontconvert CLI arguments
///
/// Examples:
///   fontconvert FiraSans 12 FiraSans-Regular.ttf                  # C header on stdout
///   fontconvert FiraSans 12 FiraSans.ttf Symbols.ttf --compress   # fall back to a second font
///   fontconvert Mono 10 mono.ttf --additional-intervals 0x2190,0x21FF
///   fontconvert Mono 10 mono.ttf --format json -o mono.json      # inspect the resource
///   fontconvert --new-config                                      # write a default settings file
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "fontconvert",
    version,
    about = "Generate a bitmap font resource from outline fonts",
    long_about = "Rasterizes a fixed set of Unicode code points from a prioritized stack of TTF/OTF fonts into a 4-bit greyscale bitmap font for e-paper display controllers, and writes it as a C header (or JSON)."
)]
pub struct CliArgs {
    /// Name of the font, used as the C symbol prefix
    #[clap(required_unless_present = "new_config")]
    pub name: Option<String>,

    /// Font size in points
    #[clap(required_unless_present = "new_config")]
    pub size: Option<u32>,

    /// Font files, ordered by descending priority
    #[clap(
        value_name = "FONT",
        required_unless_present = "new_config",
        num_args = 1..,
        long_help = "Font files, ordered by descending priority. Each code point is taken from the first font that contains it."
    )]
    pub fontstack: Vec<PathBuf>,

    /// Compress glyph bitmaps
    #[clap(
        long = "compress",
        help = "Compress glyph bitmaps",
        long_help = "Compress every glyph bitmap as an independent zlib stream. The display runtime must inflate glyphs before drawing them."
    )]
    pub compress: bool,

    /// Additional code point intervals to export
    #[clap(
        long = "additional-intervals",
        value_name = "MIN,MAX",
        action = ArgAction::Append,
        help = "Additional code point interval to export as min,max. Can be repeated.",
        long_help = "Additional inclusive code point interval to export, given as min,max. Bounds may be decimal or 0x/0o/0b prefixed. This argument can be repeated."
    )]
    pub additional_intervals: Vec<String>,

    /// Output format
    #[clap(long = "format", short = 'f', value_enum, help = "Output format [default: c]")]
    pub format: Option<OutputFormat>,

    /// Output file
    #[clap(
        long = "output",
        short = 'o',
        help = "Write the resource to a file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Settings file to use instead of the user config
    #[clap(long = "config", short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Character whose font supplies line height, ascender and descender
    #[clap(
        long = "reference-char",
        value_name = "CHAR",
        help = "Character used to pick the font for vertical metrics [default: |]"
    )]
    pub reference_char: Option<char>,

    /// Reject overlapping intervals
    #[clap(
        long = "strict-intervals",
        help = "Fail instead of warning when intervals overlap"
    )]
    pub strict_intervals: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Initialize user configuration directory with a default settings file
    #[clap(
        long = "new-config",
        help = "Initialize the user config directory with a settings file",
        long_help = "Create the fontconvert config directory with a settings.json holding the default values, then exit."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures the font files exist and the font name can be used as
    /// a C identifier, so mistakes are reported before any work is done.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_config {
            return Ok(());
        }

        match &self.name {
            Some(name) if is_c_identifier(name) => {}
            Some(name) => {
                return Err(format!(
                    "Invalid font name: '{name}'\nThe name is used as a C identifier: letters, digits and '_' only, not starting with a digit."
                ));
            }
            None => return Err("Missing font name".to_string()),
        }

        match self.size {
            Some(0) => return Err("Font size must be a positive integer".to_string()),
            Some(_) => {}
            None => return Err("Missing font size".to_string()),
        }

        if self.fontstack.is_empty() {
            return Err("At least one font file is required".to_string());
        }
        for path in &self.fontstack {
            if !path.exists() {
                return Err(format!(
                    "Font file does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
            if !path.is_file() {
                return Err(format!("Font path is not a file: {}", path.display()));
            }
        }

        if let Some(config) = &self.config {
            if !config.is_file() {
                return Err(format!("Settings file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = CliArgs::try_parse_from([
            "fontconvert",
            "FiraSans",
            "12",
            "a.ttf",
            "b.otf",
            "--compress",
            "--additional-intervals",
            "0x2190,0x21FF",
            "--additional-intervals",
            "160,255",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.name.as_deref(), Some("FiraSans"));
        assert_eq!(args.size, Some(12));
        assert_eq!(args.fontstack, vec![PathBuf::from("a.ttf"), PathBuf::from("b.otf")]);
        assert!(args.compress);
        assert_eq!(args.additional_intervals, vec!["0x2190,0x21FF", "160,255"]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.verbose, 2);
        assert!(!args.strict_intervals);
    }

    #[test]
    fn test_font_stack_is_required() {
        assert!(CliArgs::try_parse_from(["fontconvert", "Name", "12"]).is_err());
    }

    #[test]
    fn test_new_config_needs_no_positionals() {
        let args = CliArgs::try_parse_from(["fontconvert", "--new-config"]).unwrap();
        assert!(args.new_config);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_reference_char() {
        let args =
            CliArgs::try_parse_from(["fontconvert", "N", "9", "a.ttf", "--reference-char", "g"]).unwrap();
        assert_eq!(args.reference_char, Some('g'));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("font.ttf");
        std::fs::write(&font, b"").unwrap();
        let font_arg = font.to_string_lossy().into_owned();

        let ok = CliArgs::try_parse_from(["fontconvert", "Good_1", "12", &font_arg]).unwrap();
        assert!(ok.validate().is_ok());

        let bad_name = CliArgs::try_parse_from(["fontconvert", "1Bad", "12", &font_arg]).unwrap();
        assert!(bad_name.validate().unwrap_err().contains("Invalid font name"));

        let zero = CliArgs::try_parse_from(["fontconvert", "Good", "0", &font_arg]).unwrap();
        assert!(zero.validate().is_err());

        let missing = CliArgs::try_parse_from(["fontconvert", "Good", "12", "/nonexistent/font.ttf"]).unwrap();
        assert!(missing.validate().unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_c_identifier() {
        assert!(is_c_identifier("FiraSans12"));
        assert!(is_c_identifier("_x"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("9lives"));
        assert!(!is_c_identifier("with-dash"));
    }
}
