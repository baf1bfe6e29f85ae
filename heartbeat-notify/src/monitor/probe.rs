//! File age probing and stall evaluation

use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Time since a file was last modified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAge {
    Known(Duration),
    /// File is missing or could not be inspected
    Infinite,
}

impl FileAge {
    pub fn as_secs_f64(&self) -> f64 {
        match self {
            Self::Known(age) => age.as_secs_f64(),
            Self::Infinite => f64::INFINITY,
        }
    }
}

impl std::fmt::Display for FileAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(age) => write!(f, "{:.2}s", age.as_secs_f64()),
            Self::Infinite => write!(f, "infinite"),
        }
    }
}

/// Age of the file at `path` as seen at `now`.
///
/// Never fails: a missing or unreadable file is reported as [`FileAge::Infinite`].
/// A modification time in the future counts as age zero.
pub fn age_of(path: &Path, now: DateTime<Local>) -> FileAge {
    let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "heartbeat file does not exist");
            return FileAge::Infinite;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read heartbeat file metadata");
            return FileAge::Infinite;
        }
    };

    let modified: DateTime<Local> = modified.into();
    let age = now
        .signed_duration_since(modified)
        .to_std()
        .unwrap_or(Duration::ZERO);
    FileAge::Known(age)
}

/// A file is stalled once its age strictly exceeds the threshold.
pub fn is_stalled(age: FileAge, heartbeat_seconds: u64) -> bool {
    match age {
        FileAge::Known(age) => age > Duration::from_secs(heartbeat_seconds),
        FileAge::Infinite => true,
    }
}
