//! End-to-end tests for heartbeat-notify
//!
//! Drives the monitor through its public API and the compiled binary against
//! real files, with mockito servers standing in for the chat webhook.

pub mod binary;
pub mod helpers;

pub use helpers::*;
