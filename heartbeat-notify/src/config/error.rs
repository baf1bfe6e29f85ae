use std::path::PathBuf;

use thiserror::Error;

use super::types::ValidationError;

/// Why a configuration file could not become the active configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config file {path}:\n  - {}", format_errors(.errors))]
    Invalid {
        path: PathBuf,
        errors: Vec<ValidationError>,
    },
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  - ")
}
