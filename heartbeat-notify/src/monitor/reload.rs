//! Configuration hot reload driven by the config file's modification time.

use std::time::SystemTime;
use tracing::{error, info, warn};

use crate::config::{config_modified, ConfigStore};

/// Result of a reload check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Modification time unchanged; nothing was read
    Unchanged,
    /// New configuration is active
    Reloaded { files: usize },
    /// File changed but is invalid; the previous configuration stays active
    Rejected { error: String },
    /// Config file could not be stat'ed; the previous configuration stays active
    Unavailable,
}

#[derive(Debug, Default)]
pub struct ReloadController {
    last_seen: Option<SystemTime>,
    source_missing: bool,
}

impl ReloadController {
    pub fn new(last_seen: Option<SystemTime>) -> Self {
        Self {
            last_seen,
            source_missing: false,
        }
    }

    /// Track changes relative to the file the store was loaded from
    pub fn for_store(store: &ConfigStore) -> Self {
        Self::new(store.loaded_from())
    }

    pub fn last_seen(&self) -> Option<SystemTime> {
        self.last_seen
    }

    /// Reload `store` if its source file changed since the last check.
    ///
    /// A rejected file still records its modification time, so it is not
    /// re-parsed every tick; saving the file again retriggers the reload.
    /// Suppression and schedule state are not touched here.
    pub fn check(&mut self, store: &mut ConfigStore) -> ReloadOutcome {
        let modified = match config_modified(store.path()) {
            Ok(modified) => modified,
            Err(e) => {
                if !self.source_missing {
                    warn!(
                        path = %store.path().display(),
                        error = %e,
                        "cannot stat config file; keeping current configuration"
                    );
                    self.source_missing = true;
                }
                // Forget the old stamp so the file is reloaded as soon as it is back
                self.last_seen = None;
                return ReloadOutcome::Unavailable;
            }
        };
        self.source_missing = false;

        if self.last_seen == Some(modified) {
            return ReloadOutcome::Unchanged;
        }
        self.last_seen = Some(modified);

        let previous_log_file = store.config().log_file.clone();
        let source = store.path().to_path_buf();
        match store.reload(modified) {
            Ok(config) => {
                let files = config.files.len();
                let log_file_changed = config.log_file != previous_log_file;
                info!(path = %source.display(), files, "configuration reloaded");
                if log_file_changed {
                    warn!("log_file changed; the new location is used after restart");
                }
                ReloadOutcome::Reloaded { files }
            }
            Err(e) => {
                error!(error = %e, "configuration reload failed; keeping previous configuration");
                ReloadOutcome::Rejected {
                    error: e.to_string(),
                }
            }
        }
    }
}
