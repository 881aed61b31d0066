//! Axum server exposing the webhook intake and health endpoints.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use herald_core::{render_notification, NotificationFields};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::bridge_config::BridgeConfig;
use crate::signal_client::{SendMessageRequest, SignalApiClient};

pub const WEBHOOK_ENDPOINT: &str = "/webhook";
pub const HEALTH_ENDPOINT: &str = "/health";

/// Shared handler state: the startup-built config and the Signal client with
/// its pooled connections. Cloned per request, never mutated.
#[derive(Clone)]
pub struct ServerState {
    config: Arc<BridgeConfig>,
    signal: SignalApiClient,
}

impl ServerState {
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let signal = SignalApiClient::new(config.send_url.clone(), config.about_url())?;
        Ok(Self {
            config: Arc::new(config),
            signal,
        })
    }
}

pub fn build_bridge_router(state: ServerState) -> Router {
    Router::new()
        .route(WEBHOOK_ENDPOINT, post(handle_webhook))
        .route(HEALTH_ENDPOINT, get(handle_health))
        .with_state(state)
}

/// Bind the configured address and serve until ctrl-c.
pub async fn run_bridge_server(config: BridgeConfig) -> Result<()> {
    let listen_addr = config.listen_addr();
    let state = ServerState::new(config)?;

    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind webhook server on {listen_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound webhook server address")?;
    tracing::info!("webhook server listening on {local_addr}");

    let app = build_bridge_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("webhook server exited unexpectedly")
}

async fn handle_webhook(State(state): State<ServerState>, Json(payload): Json<Value>) -> Response {
    match relay_notification(&state, &payload).await {
        Ok(()) => (StatusCode::OK, "Notification sent to Signal").into_response(),
        Err(error) => {
            tracing::error!("webhook relay failed: {error:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {error}")).into_response()
        }
    }
}

/// Transform the inbound payload and forward it to the Signal bridge. The
/// image fetch is a degradable side step; only the send itself can fail the
/// request.
async fn relay_notification(state: &ServerState, payload: &Value) -> Result<()> {
    let fields = NotificationFields::from_payload(payload);
    tracing::info!(event = %fields.event, subject = %fields.subject, "received overseerr webhook");

    let message = render_notification(&fields);
    let base64_attachments = match fields.image_url() {
        Some(url) => {
            degrade_on_failure("image fetch", state.signal.fetch_attachment(url).await)
                .map(|encoded| vec![encoded])
        }
        None => None,
    };

    let request = SendMessageRequest {
        message,
        number: state.config.sender_number.clone(),
        recipients: state.config.recipients.clone(),
        base64_attachments,
    };
    state.signal.send_message(&request).await?;
    tracing::info!("notification relayed to signal");
    Ok(())
}

async fn handle_health(State(state): State<ServerState>) -> Response {
    match state.signal.check_about().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "signal_api": "reachable" })),
        )
            .into_response(),
        Err(error) => {
            tracing::warn!("health probe failed: {error:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "signal_api": "unreachable" })),
            )
                .into_response()
        }
    }
}

/// Run a fallible side step whose failure must not block the relay: log the
/// error, drop the value.
fn degrade_on_failure<T>(step: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!("{step} degraded: {error:#}");
            None
        }
    }
}
