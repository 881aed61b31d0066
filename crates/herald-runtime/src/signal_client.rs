//! HTTP client for the signal-cli-rest-api bridge.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Serialize;

/// Overall budget for a relay or probe request.
pub const REQUEST_TIMEOUT_MS: u64 = 15_000;
/// Poster downloads get a shorter leash; a slow image host must not stall
/// the relay for long.
pub const IMAGE_FETCH_TIMEOUT_MS: u64 = 5_000;

const ERROR_BODY_LIMIT: usize = 320;

/// JSON body for `POST /v2/send`. The attachments key is omitted entirely
/// when no image was fetched, not serialized as null.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub message: String,
    pub number: String,
    pub recipients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_attachments: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct SignalApiClient {
    http: reqwest::Client,
    send_url: String,
    about_url: String,
}

impl SignalApiClient {
    pub fn new(send_url: String, about_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("herald-signal-bridge")
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .context("failed to create signal api client")?;
        Ok(Self {
            http,
            send_url,
            about_url,
        })
    }

    /// Relay a formatted notification. A failure here is the webhook
    /// caller's 500; there is no retry.
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<()> {
        let response = self
            .http
            .post(&self.send_url)
            .json(request)
            .send()
            .await
            .context("signal send request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "signal send failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, ERROR_BODY_LIMIT)
            );
        }
        Ok(())
    }

    /// Download a notification image and return it base64-encoded for the
    /// `base64_attachments` field.
    pub async fn fetch_attachment(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .timeout(Duration::from_millis(IMAGE_FETCH_TIMEOUT_MS))
            .send()
            .await
            .with_context(|| format!("image fetch failed for {url}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("image fetch for {url} returned status {}", status.as_u16());
        }
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read image body from {url}"))?;
        Ok(BASE64_STANDARD.encode(&bytes))
    }

    /// Probe `GET /v1/about` on the bridge. Used by the health endpoint.
    pub async fn check_about(&self) -> Result<()> {
        let response = self
            .http
            .get(&self.about_url)
            .send()
            .await
            .context("signal about request failed")?;
        let status = response.status();
        if !status.is_success() {
            bail!("signal about returned status {}", status.as_u16());
        }
        Ok(())
    }
}

fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}
