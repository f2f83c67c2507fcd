//! Application runner logic
//!
//! Handles the different ways to run fontconvert

use std::fs;
use std::io::Write;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::core::{BuildSettings, CliArgs, ConfigFile};
use crate::font_source::FontStack;
use crate::intervals::IntervalTable;
use crate::layout::{build_font, FontResource};
use crate::logging;

/// Run the application with the given CLI arguments.
/// Handles special CLI flags and delegates to the build.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    cli_args.validate().map_err(|e| anyhow!(e))?;

    let config = match &cli_args.config {
        Some(path) => Some(ConfigFile::load_from(path)?),
        None => ConfigFile::load()?,
    };
    let settings = BuildSettings::resolve(&cli_args, config.as_ref()).map_err(|e| anyhow!(e))?;

    let log_dir = settings.log_to_file.then(ConfigFile::logs_dir);
    let _log_guard = logging::init(cli_args.verbose, log_dir.as_deref())?;
    if let Some(path) = &cli_args.config {
        debug!("Using settings from {:?}", path);
    } else if config.is_some() {
        debug!("Using settings from {:?}", ConfigFile::config_path());
    }

    let resource = build(&settings)?;
    let rendered = settings
        .format
        .emitter()
        .emit_to_vec(&settings.name, &resource)
        .context("Failed to render font resource")?;

    match &settings.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", rendered.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&rendered)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Load the font stack and build the resource described by `settings`.
pub fn build(settings: &BuildSettings) -> Result<FontResource> {
    let table = IntervalTable::from_args(&settings.additional_intervals)?;
    let stack = FontStack::load(&settings.fonts, settings.size)
        .context("Failed to load font stack")?;
    info!(
        "Converting {} at {}pt ({}px) from {} font(s)",
        settings.name,
        settings.size.points,
        settings.size.pixels(),
        stack.len()
    );

    let resource = build_font(&stack, &table, &settings.build_options())
        .with_context(|| format!("Failed to build font {}", settings.name))?;
    Ok(resource)
}
