//! Resolved build settings
//!
//! Priority order for every setting:
//! 1. CLI argument
//! 2. Config file setting (~/.config/fontconvert/settings.json)
//! 3. Built-in default

use std::path::PathBuf;

use tracing::debug;

use super::cli::CliArgs;
use super::config_file::ConfigFile;
use crate::emit::OutputFormat;
use crate::font_source::CharSize;
use crate::glyph::Compression;
use crate::layout::{BuildOptions, REFERENCE_CHAR};

/// Everything a single build needs, after merging CLI and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub name: String,
    pub size: CharSize,
    pub fonts: Vec<PathBuf>,
    pub compression: Compression,
    /// Config file intervals first, then CLI intervals.
    pub additional_intervals: Vec<String>,
    pub reference_char: char,
    pub strict_intervals: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub log_to_file: bool,
}

impl BuildSettings {
    pub fn resolve(cli: &CliArgs, config: Option<&ConfigFile>) -> Result<Self, String> {
        let default_config = ConfigFile::default();
        let config = config.unwrap_or(&default_config);

        let name = cli.name.clone().ok_or("Missing font name")?;
        let points = cli.size.ok_or("Missing font size")?;

        let compress = cli.compress || config.compress.unwrap_or(false);
        let strict_intervals = cli.strict_intervals || config.strict_intervals.unwrap_or(false);

        let reference_char = cli
            .reference_char
            .or(config.reference_char)
            .unwrap_or(REFERENCE_CHAR);
        let format = cli.format.or(config.format).unwrap_or_default();

        let mut additional_intervals = config.additional_intervals.clone();
        additional_intervals.extend(cli.additional_intervals.iter().cloned());

        let settings = Self {
            name,
            size: CharSize::new(points),
            fonts: cli.fontstack.clone(),
            compression: Compression::from_flag(compress),
            additional_intervals,
            reference_char,
            strict_intervals,
            format,
            output: cli.output.clone(),
            log_to_file: config.log_to_file.unwrap_or(false),
        };
        debug!("Resolved build settings: {:?}", settings);
        Ok(settings)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            compression: self.compression,
            reference_char: self.reference_char,
            strict_intervals: self.strict_intervals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> CliArgs {
        let mut full = vec!["fontconvert", "Demo", "12", "demo.ttf"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = BuildSettings::resolve(&cli(&[]), None).unwrap();
        assert_eq!(settings.name, "Demo");
        assert_eq!(settings.size, CharSize::new(12));
        assert_eq!(settings.size.dpi, 150);
        assert_eq!(settings.compression, Compression::None);
        assert_eq!(settings.reference_char, '|');
        assert_eq!(settings.format, OutputFormat::C);
        assert!(settings.additional_intervals.is_empty());
        assert!(!settings.strict_intervals);
    }

    #[test]
    fn test_config_fills_in_unset_options() {
        let config = ConfigFile {
            compress: Some(true),
            reference_char: Some('g'),
            format: Some(OutputFormat::Json),
            additional_intervals: vec!["0x2500,0x259F".to_string()],
            ..ConfigFile::default()
        };
        let settings = BuildSettings::resolve(&cli(&[]), Some(&config)).unwrap();
        assert_eq!(settings.compression, Compression::Zlib);
        assert_eq!(settings.reference_char, 'g');
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.additional_intervals, vec!["0x2500,0x259F"]);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = ConfigFile {
            reference_char: Some('g'),
            format: Some(OutputFormat::Json),
            additional_intervals: vec!["0x2500,0x259F".to_string()],
            ..ConfigFile::default()
        };
        let args = cli(&[
            "--reference-char",
            "j",
            "--format",
            "c",
            "--additional-intervals",
            "160,255",
        ]);
        let settings = BuildSettings::resolve(&args, Some(&config)).unwrap();
        assert_eq!(settings.reference_char, 'j');
        assert_eq!(settings.format, OutputFormat::C);
        assert_eq!(settings.additional_intervals, vec!["0x2500,0x259F", "160,255"]);
    }

    #[test]
    fn test_build_options() {
        let settings = BuildSettings::resolve(&cli(&["--compress", "--strict-intervals"]), None).unwrap();
        let options = settings.build_options();
        assert_eq!(options.compression, Compression::Zlib);
        assert!(options.strict_intervals);
        assert_eq!(options.reference_char, REFERENCE_CHAR);
    }
}
