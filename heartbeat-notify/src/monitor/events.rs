//! Events produced by a monitoring cycle

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    ConfigReloaded {
        files: usize,
    },
    /// Config file changed but was invalid; previous config retained
    ConfigRejected {
        error: String,
    },
    DayRolledOver {
        day_of_year: u32,
    },
    /// File crossed into the stalled state and an alert was attempted
    FileStalled {
        name: String,
        identity: PathBuf,
        /// False when there was no destination or the delivery failed
        delivered: bool,
    },
    FileRecovered {
        name: String,
        identity: PathBuf,
    },
    /// File could not be checked this cycle
    FileError {
        name: String,
        error: String,
    },
    AliveSent {
        slot: String,
        delivered: bool,
    },
    /// Slot matched but no default webhook is configured; slot stays unfired
    AliveSkipped {
        slot: String,
    },
}
