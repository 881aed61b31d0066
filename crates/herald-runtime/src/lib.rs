//! Runtime for the Overseerr to Signal bridge: configuration, the
//! signal-cli-rest-api client, and the webhook server.
//!
//! The pure payload/formatting core lives in `herald-core`; this crate wires
//! it to the network. Each webhook call is fully self-contained: extract,
//! format, optionally fetch the poster image, relay. No state outlives a
//! request and nothing is retried.

pub mod bridge_config;
pub mod signal_client;
pub mod webhook_server;

pub use bridge_config::{
    normalize_send_url, parse_recipients, BridgeConfig, DEFAULT_PORT, SIGNAL_ABOUT_PATH,
    SIGNAL_SEND_PATH,
};
pub use signal_client::{SendMessageRequest, SignalApiClient};
pub use webhook_server::{build_bridge_router, run_bridge_server, ServerState};
