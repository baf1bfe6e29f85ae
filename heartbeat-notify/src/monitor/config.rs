//! Runtime settings for the monitor loop

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub config_path: PathBuf,
    /// Pause between cycles; `None` runs a single cycle
    pub interval: Option<Duration>,
}

impl MonitorConfig {
    /// Build from an interval in seconds, where 0 means a single cycle
    pub fn new(config_path: impl Into<PathBuf>, interval_secs: Option<u64>) -> Self {
        Self {
            config_path: config_path.into(),
            interval: interval_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn is_one_shot(&self) -> bool {
        self.interval.is_none()
    }
}
