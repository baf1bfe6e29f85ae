//! Configuration document type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of the YAML configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Destination used when a file has no webhook of its own, and for alive pings
    #[serde(default)]
    pub default_webhook_url: Option<String>,
    /// Files to watch, in the order they are checked
    pub files: Vec<WatchedFile>,
    /// Local times of day ("HH:MM") at which an alive ping is sent
    #[serde(default)]
    pub alive_schedule: Vec<String>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Destination for a stalled alert about `file`
    pub fn destination_for<'a>(&'a self, file: &'a WatchedFile) -> Option<&'a str> {
        file.webhook_url
            .as_deref()
            .or(self.default_webhook_url.as_deref())
    }
}

/// A single heartbeat file entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedFile {
    /// Display label used in alerts and logs
    pub name: String,
    /// Path as written in the config; may start with `~` or be relative
    pub path: PathBuf,
    /// Maximum age in seconds before the file counts as stalled
    pub heartbeat_seconds: u64,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

/// A single problem found while validating a configuration document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted location of the offending field, e.g. `files[1].heartbeat_seconds`
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
