//! Core application functionality
//!
//! This module contains the application layer around the conversion
//! pipeline:
//! - CLI handling and the user config file
//! - Settings resolution
//! - Error types
//! - Running a build and writing its output

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::FontError;
pub use runner::run_app;
pub use settings::BuildSettings;
