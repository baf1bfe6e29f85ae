//! Alive-ping schedule tracking.
//!
//! Slots are local wall-clock minutes ("HH:MM"). Each slot fires at most once
//! per calendar day; the fired set is cleared when the local day-of-year changes.

use chrono::{DateTime, Datelike, Local};
use std::collections::HashSet;

/// Format used for schedule slots
pub const SLOT_FORMAT: &str = "%H:%M";

#[derive(Debug, Default, Clone)]
pub struct AliveScheduler {
    sent_today: HashSet<String>,
    last_day: Option<u32>,
}

impl AliveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking from the day containing `now`
    pub fn starting_at(now: DateTime<Local>) -> Self {
        Self {
            sent_today: HashSet::new(),
            last_day: Some(now.ordinal()),
        }
    }

    /// Clear the fired set if `now` falls on a different day than the last tick.
    ///
    /// Returns true when a rollover happened.
    pub fn roll_day(&mut self, now: DateTime<Local>) -> bool {
        let today = now.ordinal();
        match self.last_day {
            Some(day) if day == today => false,
            Some(_) => {
                self.sent_today.clear();
                self.last_day = Some(today);
                true
            }
            None => {
                self.last_day = Some(today);
                false
            }
        }
    }

    /// The current slot, if it is scheduled and has not fired today
    pub fn due_slot(&self, now: DateTime<Local>, schedule: &[String]) -> Option<String> {
        let slot = now.format(SLOT_FORMAT).to_string();
        if schedule.contains(&slot) && !self.sent_today.contains(&slot) {
            Some(slot)
        } else {
            None
        }
    }

    pub fn mark_sent(&mut self, slot: String) {
        self.sent_today.insert(slot);
    }

    pub fn was_sent(&self, slot: &str) -> bool {
        self.sent_today.contains(slot)
    }
}
