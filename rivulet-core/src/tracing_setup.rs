//! Tracing setup for Rivulet.
//!
//! Dual output: console logs at a user-controlled level and full debug logs
//! to disk, so complete diagnostics survive a run without cluttering the CLI.

use std::fs::{File, create_dir_all};
use std::path::Path;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Initializes tracing with a console layer and a full-debug file layer.
///
/// Writes complete debug logs to `logs/rivulet-last-run.log`, overwriting the
/// previous run. `RUST_LOG` overrides the console level when set.
///
/// # Errors
/// - `Box<dyn std::error::Error>` - Logs directory cannot be created or the
///   log file cannot be opened
pub fn init_tracing(
    console_level: Level,
    logs_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let logs_path = logs_dir.unwrap_or_else(|| Path::new("logs"));
    create_dir_all(logs_path)?;

    let log_file_path = logs_path.join("rivulet-last-run.log");
    let log_file = File::create(&log_file_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.to_string()));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        "Tracing initialized: console={}, debug_file={}",
        console_level,
        log_file_path.display()
    );

    Ok(())
}

/// CLI log levels for user control.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Informational, warning, and error messages
    Info,
    /// Debug, informational, warning, and error messages
    Debug,
    /// All messages including detailed tracing
    Trace,
}

impl CliLogLevel {
    /// Converts the CLI log level to a `tracing::Level`.
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_levels_map_to_tracing_levels() {
        assert_eq!(CliLogLevel::Info.as_tracing_level(), Level::INFO);
        assert_eq!(CliLogLevel::Trace.as_tracing_level(), Level::TRACE);
    }
}
