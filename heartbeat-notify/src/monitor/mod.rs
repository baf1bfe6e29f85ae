//! Heartbeat monitor
//!
//! Each cycle reloads the config if its file changed, checks every watched
//! file for staleness, alerts once per stall, and sends scheduled alive pings.

mod alive;
mod clock;
mod config;
pub mod core;
mod events;
pub mod probe;
mod reload;
mod suppressor;


pub use alive::AliveScheduler;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::MonitorConfig;
pub use core::Monitor;
pub use events::MonitorEvent;
pub use probe::{age_of, is_stalled, FileAge};
pub use reload::{ReloadController, ReloadOutcome};
pub use suppressor::{Suppressor, Transition};
