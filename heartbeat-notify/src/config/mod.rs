//! YAML configuration: document types, validation and the active config store

mod error;
mod store;
mod types;
mod validation;


pub use error::ConfigError;
pub use store::{config_modified, load_config, parse_config, ConfigStore};
pub use types::{AppConfig, ValidationError, WatchedFile};
pub use validation::validate;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
