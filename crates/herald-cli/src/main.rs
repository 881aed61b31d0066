//! `herald` binary: relay Overseerr webhook notifications to a
//! signal-cli-rest-api bridge.

use anyhow::Result;
use clap::Parser;
use herald_runtime::{
    normalize_send_url, parse_recipients, run_bridge_server, BridgeConfig, DEFAULT_PORT,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "herald",
    about = "Overseerr webhook to Signal notification bridge",
    version
)]
struct Cli {
    #[arg(
        long,
        env = "HERALD_BIND",
        default_value = "0.0.0.0",
        help = "Address the webhook server binds to"
    )]
    bind: String,

    #[arg(
        long,
        env = "PORT",
        default_value_t = DEFAULT_PORT,
        help = "Port the webhook server listens on"
    )]
    port: u16,

    #[arg(
        long = "signal-api-url",
        env = "SIGNAL_API_URL",
        help = "signal-cli-rest-api endpoint; the /v2/send suffix is appended when missing"
    )]
    signal_api_url: String,

    #[arg(
        long = "signal-number",
        env = "SIGNAL_NUMBER",
        help = "Sender number registered with the Signal bridge"
    )]
    signal_number: String,

    #[arg(
        long = "signal-recipients",
        env = "SIGNAL_RECIPIENTS",
        help = "Comma-separated recipient numbers or group ids"
    )]
    signal_recipients: String,
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = BridgeConfig {
        bind: cli.bind,
        port: cli.port,
        send_url: normalize_send_url(&cli.signal_api_url)?,
        sender_number: cli.signal_number,
        recipients: parse_recipients(&cli.signal_recipients)?,
    };
    tracing::info!(
        send_url = %config.send_url,
        recipients = config.recipients.len(),
        "starting overseerr to signal bridge"
    );

    run_bridge_server(config).await
}
