//! Shared fixtures: recording sink, file timestamps and webhook mock helpers

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use anyhow::{bail, Result};
use chrono::{DateTime, Local, TimeZone};
use filetime::FileTime;
use heartbeat_notify::notifier::NotificationSink;
use mockito::{Matcher, Server};
use serde_json::json;

/// Sink that remembers every delivery instead of sending it
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, destination: &str, message: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), message.to_string()));
        if self.fail {
            bail!("simulated delivery failure");
        }
        Ok(())
    }
}

/// Fixed local time used as t=0 by the flow tests
pub fn base_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap()
}

/// Write `content` and pin the file's mtime to `when`
pub fn write_at(path: &Path, content: &str, when: DateTime<Local>) {
    fs::write(path, content).unwrap();
    let when: SystemTime = when.into();
    filetime::set_file_mtime(path, FileTime::from_system_time(when)).unwrap();
}

/// YAML for a config watching the given `(name, path, seconds)` entries
pub fn config_yaml(default_webhook: Option<&str>, files: &[(&str, &Path, u64)]) -> String {
    let mut yaml = String::new();
    if let Some(url) = default_webhook {
        yaml.push_str(&format!("default_webhook_url: {url}\n"));
    }
    if files.is_empty() {
        yaml.push_str("files: []\n");
    } else {
        yaml.push_str("files:\n");
        for (name, path, seconds) in files {
            yaml.push_str(&format!(
                "  - name: {name}\n    path: {}\n    heartbeat_seconds: {seconds}\n",
                path.display()
            ));
        }
    }
    yaml
}

/// Path the mock webhook endpoints are mounted on
pub const WEBHOOK_PATH: &str = "/api/webhooks/42/token";

/// Full webhook URL on a mock server
pub fn webhook_url(server: &Server) -> String {
    format!("{}{WEBHOOK_PATH}", server.url())
}

/// Body matcher for a webhook post carrying `content`
pub fn content_body(content: &str) -> Matcher {
    Matcher::Json(json!({ "content": content }))
}
