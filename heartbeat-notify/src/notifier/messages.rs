//! Alert message text.

use crate::config::WatchedFile;

/// Message sent when a watched file crosses into the stalled state
pub fn stalled_message(file: &WatchedFile) -> String {
    format!(
        "⚠️ **Heartbeat Missed**: File `{}` (`{}`) has not been updated in over {} seconds.",
        file.name,
        file.path.display(),
        file.heartbeat_seconds
    )
}

/// Message sent at each alive-schedule slot
pub fn alive_message(slot: &str) -> String {
    format!("🟢 **Process Alive**: Heartbeat monitor is running. Time: {slot}")
}

/// Truncate message content by character count, not byte count.
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
