//! Bridge configuration, built once at startup and shared by the handlers.

use anyhow::{bail, Result};

pub const SIGNAL_SEND_PATH: &str = "/v2/send";
pub const SIGNAL_ABOUT_PATH: &str = "/v1/about";
pub const DEFAULT_PORT: u16 = 3001;

/// Everything the webhook server needs to talk to the Signal bridge. The CLI
/// assembles one of these and passes it in; handlers only ever see it behind
/// an `Arc`, never as ambient globals.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub bind: String,
    pub port: u16,
    /// Normalized `POST` target, always ending in [`SIGNAL_SEND_PATH`].
    pub send_url: String,
    pub sender_number: String,
    pub recipients: Vec<String>,
}

impl BridgeConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Health-probe target: the send URL with the send suffix swapped for
    /// the about path.
    pub fn about_url(&self) -> String {
        let base = self
            .send_url
            .strip_suffix(SIGNAL_SEND_PATH)
            .unwrap_or(&self.send_url);
        format!("{base}{SIGNAL_ABOUT_PATH}")
    }
}

/// Normalize a configured Signal endpoint into the send URL: trailing
/// slashes are stripped and the `/v2/send` suffix is appended when missing,
/// so both `http://signal:8080` and `http://signal:8080/v2/send/` are
/// accepted.
pub fn normalize_send_url(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("signal api url must not be empty");
    }
    if trimmed.ends_with(SIGNAL_SEND_PATH) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{SIGNAL_SEND_PATH}"))
    }
}

/// Split a comma-separated recipient list, trimming entries and dropping
/// empties. At least one recipient must survive.
pub fn parse_recipients(raw: &str) -> Result<Vec<String>> {
    let recipients: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();
    if recipients.is_empty() {
        bail!("at least one signal recipient is required");
    }
    Ok(recipients)
}
