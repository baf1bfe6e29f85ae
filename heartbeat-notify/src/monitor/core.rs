//! Core Monitor implementation

use anyhow::Result;
use chrono::{DateTime, Datelike, Local};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::{AppConfig, ConfigStore, WatchedFile};
use crate::fs::resolve_identity;
use crate::notifier::{alive_message, destination_label, stalled_message, NotificationSink};

use super::alive::AliveScheduler;
use super::clock::Clock;
use super::events::MonitorEvent;
use super::probe::{age_of, is_stalled, FileAge};
use super::reload::{ReloadController, ReloadOutcome};
use super::suppressor::{Suppressor, Transition};

/// Owns all monitoring state: the active config, what has been alerted on,
/// and which alive slots fired today.
pub struct Monitor {
    store: ConfigStore,
    reload: ReloadController,
    suppressor: Suppressor,
    alive: AliveScheduler,
    clock: Box<dyn Clock>,
    sink: Box<dyn NotificationSink>,
}

impl Monitor {
    pub fn new(store: ConfigStore, clock: Box<dyn Clock>, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            reload: ReloadController::for_store(&store),
            alive: AliveScheduler::starting_at(clock.now()),
            suppressor: Suppressor::new(),
            store,
            clock,
            sink,
        }
    }

    pub fn config(&self) -> &AppConfig {
        self.store.config()
    }

    pub fn suppressor(&self) -> &Suppressor {
        &self.suppressor
    }

    pub fn alive_scheduler(&self) -> &AliveScheduler {
        &self.alive
    }

    /// Run one monitoring cycle and return what happened
    pub fn run_cycle(&mut self) -> Vec<MonitorEvent> {
        let mut events = Vec::new();

        match self.reload.check(&mut self.store) {
            ReloadOutcome::Reloaded { files } => events.push(MonitorEvent::ConfigReloaded { files }),
            ReloadOutcome::Rejected { error } => events.push(MonitorEvent::ConfigRejected { error }),
            ReloadOutcome::Unchanged | ReloadOutcome::Unavailable => {}
        }

        let now = self.clock.now();
        if self.alive.roll_day(now) {
            debug!(day = now.ordinal(), "new day; alive schedule reset");
            events.push(MonitorEvent::DayRolledOver {
                day_of_year: now.ordinal(),
            });
        }

        self.check_files(now, &mut events);
        self.check_alive(now, &mut events);

        events
    }

    /// Run cycles until `stop` fires. With no interval, runs exactly once.
    pub fn run(&mut self, interval: Option<Duration>, stop: &Receiver<()>) {
        loop {
            let events = self.run_cycle();
            debug!(events = events.len(), "cycle complete");

            let Some(interval) = interval else {
                return;
            };

            debug!(seconds = interval.as_secs(), "sleeping until next cycle");
            match stop.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    info!("stop requested; shutting down");
                    return;
                }
            }
        }
    }

    fn check_files(&mut self, now: DateTime<Local>, events: &mut Vec<MonitorEvent>) {
        let config = self.store.config();

        for file in &config.files {
            let (identity, age) = match probe_file(file, now) {
                Ok(probed) => probed,
                Err(e) => {
                    error!(
                        file = %file.name,
                        path = %file.path.display(),
                        error = %format!("{e:#}"),
                        "error checking file"
                    );
                    events.push(MonitorEvent::FileError {
                        name: file.name.clone(),
                        error: format!("{e:#}"),
                    });
                    continue;
                }
            };

            let stalled = is_stalled(age, file.heartbeat_seconds);
            debug!(
                file = %file.name,
                age = %age,
                threshold = file.heartbeat_seconds,
                stalled,
                "checked heartbeat file"
            );

            match self.suppressor.observe(&identity, stalled) {
                Transition::BecameStalled => {
                    let delivered = match config.destination_for(file) {
                        Some(destination) => {
                            info!(file = %file.name, "file is stalled; sending notification");
                            deliver(&*self.sink, destination, &stalled_message(file))
                        }
                        None => {
                            warn!(
                                file = %file.name,
                                "file is stalled but no webhook URL is configured"
                            );
                            false
                        }
                    };
                    events.push(MonitorEvent::FileStalled {
                        name: file.name.clone(),
                        identity,
                        delivered,
                    });
                }
                Transition::StillStalled => {
                    debug!(file = %file.name, "file still stalled; already notified");
                }
                Transition::Recovered => {
                    info!(file = %file.name, "file recovered");
                    events.push(MonitorEvent::FileRecovered {
                        name: file.name.clone(),
                        identity,
                    });
                }
                Transition::Healthy => {
                    debug!(file = %file.name, "file is healthy");
                }
            }
        }
    }

    fn check_alive(&mut self, now: DateTime<Local>, events: &mut Vec<MonitorEvent>) {
        let config = self.store.config();
        let Some(slot) = self.alive.due_slot(now, &config.alive_schedule) else {
            return;
        };

        match config.default_webhook_url.as_deref() {
            Some(destination) => {
                info!(slot = %slot, "sending alive notification");
                let delivered = deliver(&*self.sink, destination, &alive_message(&slot));
                self.alive.mark_sent(slot.clone());
                events.push(MonitorEvent::AliveSent { slot, delivered });
            }
            None => {
                warn!(
                    slot = %slot,
                    "alive schedule triggered but no default webhook URL configured"
                );
                events.push(MonitorEvent::AliveSkipped { slot });
            }
        }
    }
}

/// Resolve a file's identity and measure its age
fn probe_file(file: &WatchedFile, now: DateTime<Local>) -> Result<(PathBuf, FileAge)> {
    let identity = resolve_identity(&file.path)?;
    let age = age_of(&identity, now);
    Ok((identity, age))
}

/// Deliver a message, logging instead of propagating failures
fn deliver(sink: &dyn NotificationSink, destination: &str, message: &str) -> bool {
    match sink.deliver(destination, message) {
        Ok(()) => {
            info!(destination = %destination_label(destination), "notification sent");
            true
        }
        Err(e) => {
            error!(
                destination = %destination_label(destination),
                error = %format!("{e:#}"),
                "failed to send notification"
            );
            false
        }
    }
}
