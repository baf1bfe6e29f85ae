pub mod config;
pub mod fs;
pub mod logging;
pub mod monitor;
pub mod notifier;
