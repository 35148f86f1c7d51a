//! plug-relay server entry point.
//!
//! Starts the Axum HTTP server with the `/input` producer endpoint and the
//! `/output` WebSocket endpoint.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plug_relay::app_state::AppState;
use plug_relay::config::RelayConfig;
use plug_relay::domain::EventBus;

/// Relays plug state changes from HTTP producers to WebSocket consumers.
#[derive(Debug, Parser)]
#[command(name = "plug-relay", version, about)]
struct Cli {
    /// Address to listen on, as `host:port`. Overrides `LISTEN_ADDR`.
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RelayConfig::from_env().with_listen_addr(cli.addr);
    tracing::info!(
        addr = %config.listen_addr,
        subscriber_buffer = config.subscriber_buffer,
        "starting plug-relay"
    );

    let app = plug_relay::router(AppState::new(EventBus::new(config.subscriber_buffer)));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
