//! Tracing subscriber setup.
//!
//! Logs always go to stderr. When the configuration names a `log_file`, the
//! same events are appended there without ANSI colors.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Resolve the effective filter. `--verbose` wins over `RUST_LOG`.
pub fn build_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return default_filter(true);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(false))
}

/// Open a log file for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Install the global subscriber.
///
/// Returns an error only if the log file cannot be opened; stderr logging is
/// installed regardless.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let file = log_file.map(open_log_file).transpose();
    let (file, file_error) = match file {
        Ok(file) => (file, None),
        Err(e) => (None, Some(e)),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
