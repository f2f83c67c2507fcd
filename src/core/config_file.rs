//! User configuration file handling
//!
//! Manages settings from ~/.config/fontconvert/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::emit::OutputFormat;

/// User configuration from ~/.config/fontconvert/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    /// Compress glyph bitmaps unless the CLI says otherwise
    pub compress: Option<bool>,
    /// Extra `min,max` intervals exported by every build
    pub additional_intervals: Vec<String>,
    /// Character used to pick the font for vertical metrics
    pub reference_char: Option<char>,
    /// Default output format (e.g., "c", "json")
    pub format: Option<OutputFormat>,
    /// Fail on overlapping intervals
    pub strict_intervals: Option<bool>,
    /// Also write logs to ~/.config/fontconvert/logs/
    pub log_to_file: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the fontconvert config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("fontconvert")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load the user config file, if there is one
    pub fn load() -> anyhow::Result<Option<Self>> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The settings file written by `--new-config`
    pub fn example() -> Self {
        Self {
            compress: Some(false),
            additional_intervals: Vec::new(),
            reference_char: Some(crate::layout::REFERENCE_CHAR),
            format: Some(OutputFormat::C),
            strict_intervals: Some(false),
            log_to_file: Some(false),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/fontconvert directory structure
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for build logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_in(&Self::config_dir())
    }

    fn initialize_in(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View build logs in: {:?}", logs_dir);
        Ok(())
    }
}
