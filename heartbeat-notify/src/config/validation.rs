//! Configuration document validation

use chrono::NaiveTime;
use reqwest::Url;

use super::types::{AppConfig, ValidationError};

/// Validate an "HH:MM" schedule slot (24-hour, zero-padded)
pub(crate) fn validate_schedule_slot(slot: &str) -> Result<(), String> {
    // Parsing tolerates padding spaces, so require the round trip to match
    match NaiveTime::parse_from_str(slot, "%H:%M") {
        Ok(time) if time.format("%H:%M").to_string() == slot => Ok(()),
        _ => Err(format!(
            "'{slot}' is not a zero-padded 24-hour HH:MM time"
        )),
    }
}

/// Validate a webhook destination
pub(crate) fn validate_webhook_url(url: &str) -> Result<(), String> {
    let parsed = Url::parse(url).map_err(|e| format!("invalid URL '{url}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported URL scheme '{other}' (expected http or https)")),
    }
}

/// Validate a parsed configuration, collecting every problem found
pub fn validate(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(url) = &config.default_webhook_url {
        if let Err(e) = validate_webhook_url(url) {
            errors.push(ValidationError::new("default_webhook_url", e));
        }
    }

    for (idx, file) in config.files.iter().enumerate() {
        let field = |name: &str| format!("files[{idx}].{name}");

        if file.name.trim().is_empty() {
            errors.push(ValidationError::new(field("name"), "cannot be empty"));
        }

        let raw = file.path.as_os_str();
        if raw.is_empty() {
            errors.push(ValidationError::new(field("path"), "cannot be empty"));
        } else if raw.as_encoded_bytes().contains(&0) {
            errors.push(ValidationError::new(field("path"), "contains a NUL byte"));
        }

        if file.heartbeat_seconds == 0 {
            errors.push(ValidationError::new(
                field("heartbeat_seconds"),
                "must be greater than 0",
            ));
        }

        if let Some(url) = &file.webhook_url {
            if let Err(e) = validate_webhook_url(url) {
                errors.push(ValidationError::new(field("webhook_url"), e));
            }
        }
    }

    for (idx, slot) in config.alive_schedule.iter().enumerate() {
        if let Err(e) = validate_schedule_slot(slot) {
            errors.push(ValidationError::new(format!("alive_schedule[{idx}]"), e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
