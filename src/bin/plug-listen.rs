//! plug-listen: a consumer that logs every plug event from a relay.
//!
//! Connects to `ws://<addr>/output` and logs each decoded event until the
//! relay closes the connection or a read fails.

use anyhow::Context;
use clap::Parser;
use futures_util::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing_subscriber::EnvFilter;

use plug_relay::config::RelayConfig;
use plug_relay::domain::PlugEvent;

/// Logs plug events broadcast by a plug-relay server.
#[derive(Debug, Parser)]
#[command(name = "plug-listen", version, about)]
struct Cli {
    /// Relay address as `host:port`. Overrides `LISTEN_ADDR`.
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = RelayConfig::from_env().with_listen_addr(cli.addr);
    let url = format!("ws://{}/output", config.listen_addr);
    tracing::info!(%url, "connecting");

    let (mut socket, _) = connect_async(url.as_str())
        .await
        .with_context(|| format!("failed to connect to {url}"))?;

    while let Some(frame) = socket.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                tracing::info!(error = %err, "read failed");
                break;
            }
        };
        match frame {
            Message::Text(text) => match serde_json::from_str::<PlugEvent>(text.as_str()) {
                Ok(event) => tracing::info!(plug = event.plug(), state = event.state(), "{event}"),
                Err(err) => tracing::warn!(error = %err, "failed to decode plug event"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    tracing::info!("connection closed");
    Ok(())
}
