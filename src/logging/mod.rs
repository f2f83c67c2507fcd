//! Application logging functionality
//!
//! Logs always go to stderr because stdout may carry the generated
//! resource. File logging under ~/.config/fontconvert/logs/ is optional.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Keeps the file writer alive; buffered lines are flushed on drop.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "fontconvert=info",
        1 => "fontconvert=debug",
        _ => "fontconvert=trace",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity`. When `log_dir` is given,
/// a daily rolling log file is written there as well.
pub fn init(verbosity: u8, log_dir: Option<&Path>) -> anyhow::Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "fontconvert.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(LogGuard { _file: guard })
}
