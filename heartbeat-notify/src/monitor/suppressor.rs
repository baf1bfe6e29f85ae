//! Edge-triggered alert suppression.
//!
//! A file alerts once when it becomes stalled, then stays quiet until it has
//! been seen healthy again.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What a single observation did to a file's suppression state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Quiet -> Notified. The caller should send an alert.
    BecameStalled,
    /// Notified -> Notified
    StillStalled,
    /// Notified -> Quiet
    Recovered,
    /// Quiet -> Quiet
    Healthy,
}

impl Transition {
    pub fn should_alert(self) -> bool {
        matches!(self, Self::BecameStalled)
    }
}

/// Set of resolved file identities that have already been alerted on
#[derive(Debug, Default, Clone)]
pub struct Suppressor {
    notified: HashSet<PathBuf>,
}

impl Suppressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether `identity` is currently stalled and report the transition
    pub fn observe(&mut self, identity: &Path, stalled: bool) -> Transition {
        match (stalled, self.notified.contains(identity)) {
            (true, false) => {
                self.notified.insert(identity.to_path_buf());
                Transition::BecameStalled
            }
            (true, true) => Transition::StillStalled,
            (false, true) => {
                self.notified.remove(identity);
                Transition::Recovered
            }
            (false, false) => Transition::Healthy,
        }
    }

    pub fn is_notified(&self, identity: &Path) -> bool {
        self.notified.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.notified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }
}
