//! Active configuration and the file it came from.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::error::ConfigError;
use super::types::AppConfig;
use super::validation::validate;

/// Parse and validate configuration content (for testing without file system)
pub fn parse_config(content: &str, source_path: &Path) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: source_path.to_path_buf(),
            source,
        })?;

    validate(&config).map_err(|errors| ConfigError::Invalid {
        path: source_path.to_path_buf(),
        errors,
    })?;

    Ok(config)
}

/// Read, parse and validate a configuration file
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

/// Modification time of the configuration file
pub fn config_modified(path: &Path) -> std::io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// Holds the configuration currently in force.
///
/// The active config is only ever swapped for a fully validated one, so a
/// broken file on disk never leaves the store half-updated.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    active: AppConfig,
    loaded_from: Option<SystemTime>,
}

impl ConfigStore {
    /// Load the initial configuration. Failure here is fatal to the caller.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        // Stat before reading so an edit racing the read still looks new next tick
        let loaded_from = config_modified(&path).ok();
        let active = load_config(&path)?;
        Ok(Self {
            path,
            active,
            loaded_from,
        })
    }

    /// Build a store around an already loaded configuration
    pub fn with_config(path: impl Into<PathBuf>, active: AppConfig) -> Self {
        Self {
            path: path.into(),
            active,
            loaded_from: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &AppConfig {
        &self.active
    }

    /// Modification time of the file the active config was loaded from
    pub fn loaded_from(&self) -> Option<SystemTime> {
        self.loaded_from
    }

    /// Re-read the source file and swap it in if it is valid.
    ///
    /// On error the previously active configuration is kept untouched.
    pub fn reload(&mut self, modified: SystemTime) -> Result<&AppConfig, ConfigError> {
        let fresh = load_config(&self.path)?;
        self.active = fresh;
        self.loaded_from = Some(modified);
        Ok(&self.active)
    }
}
