//! Chat webhook delivery over HTTP.
//!
//! Posts `{"content": "<message>"}` as JSON, the payload Discord-style
//! incoming webhooks accept.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::messages::truncate_content;
use super::NotificationSink;

pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
pub(crate) const HTTP_REQUEST_TIMEOUT_SECS: u64 = 10; // Total request timeout (includes connection + transfer)

/// Maximum message length accepted by Discord webhooks
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Scheme and host of a webhook URL, for logs. Webhook paths carry tokens.
pub fn destination_label(destination: &str) -> String {
    match Url::parse(destination) {
        Ok(url) => match url.host_str() {
            Some(host) => format!("{}://{host}", url.scheme()),
            None => url.scheme().to_string(),
        },
        Err(_) => "<invalid url>".to_string(),
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Create an HTTP client with bounded timeouts so a slow webhook endpoint
/// cannot stall a monitoring cycle.
pub(crate) fn create_http_client(request_timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS).min(request_timeout))
        .timeout(request_timeout)
        .user_agent(concat!("heartbeat-notify/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Validate HTTP response status code and return a descriptive error if not successful.
pub(crate) fn validate_response_status(response: &Response, context: &str) -> Result<()> {
    if !response.status().is_success() {
        let status = response.status();
        bail!(
            "{}: HTTP {} - {}",
            context,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        );
    }
    Ok(())
}

/// Delivers messages to chat webhooks
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
}

impl WebhookSink {
    /// Create a sink with the default 10 second request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_http_client(timeout)?,
        })
    }
}

impl NotificationSink for WebhookSink {
    fn deliver(&self, destination: &str, message: &str) -> Result<()> {
        let content = truncate_content(message, MAX_CONTENT_CHARS);
        let response = self
            .client
            .post(destination)
            .json(&WebhookPayload { content: &content })
            .send()
            .map_err(reqwest::Error::without_url)
            .context("Webhook request failed")?;

        validate_response_status(&response, "Webhook rejected message")?;
        debug!(status = response.status().as_u16(), "webhook accepted message");
        Ok(())
    }
}
