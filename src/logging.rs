use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Where and how the mod writes its log.
#[derive(Debug, Clone)]
pub struct LogOptions<'a> {
    /// Directory for log files (e.g., "logs")
    pub log_dir: &'a str,
    /// Prefix for log files (e.g., "customcars")
    pub log_prefix: &'a str,
    /// Debug level instead of info; `RUST_LOG` overrides both
    pub debug_mode: bool,
    /// Mirror events to stderr with colors
    pub console_output: bool,
    /// Write the file log as JSON lines instead of text
    pub json_file: bool,
}

impl Default for LogOptions<'_> {
    fn default() -> Self {
        Self {
            log_dir: "logs",
            log_prefix: "customcars",
            debug_mode: false,
            console_output: true,
            json_file: false,
        }
    }
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug_mode { "debug" } else { "info" }))
}

fn ensure_log_dir(log_dir: &str) -> Result<()> {
    let log_path = Utf8Path::new(log_dir);
    if !log_path.exists() {
        fs::create_dir_all(log_path)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

/// Setup logging with a daily rotating file and optional console output.
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn setup_logging(options: &LogOptions<'_>) -> Result<WorkerGuard> {
    ensure_log_dir(options.log_dir)?;

    let file_appender = rolling::daily(options.log_dir, options.log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = if options.json_file {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false) // No ANSI codes in log files
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let console_layer = options.console_output.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(default_filter(options.debug_mode))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, debug={}, console={}, json={}",
        options.log_dir,
        options.log_prefix,
        options.debug_mode,
        options.console_output,
        options.json_file
    );

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_directory_created() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        // Only the directory step; a global subscriber would leak into other tests
        ensure_log_dir(log_dir.to_str().unwrap()).unwrap();
        assert!(log_dir.exists());
    }

    #[test]
    fn test_default_options() {
        let options = LogOptions::default();
        assert_eq!(options.log_prefix, "customcars");
        assert!(!options.debug_mode);
        assert!(!options.json_file);
    }
}
