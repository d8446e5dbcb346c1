//! CORS relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                    RELAY                      │
//!   Browser request    │  ┌──────────┐   ┌───────────┐   ┌──────────┐  │
//!   ───────────────────┼─▶│ cors     │──▶│  handler  │──▶│ forward  │──┼──▶ Upstream
//!                      │  │ headers  │   │ (OPTIONS? │   │ (body,   │  │    (fixed
//!                      │  └──────────┘   │  answer)  │   │  uri,    │  │     host:port)
//!                      │       ▲         └───────────┘   │  headers)│  │
//!   Browser response   │       │                         └──────────┘  │
//!   ◀──────────────────┼───────┴──── status + headers + streamed body ◀┼───
//!                      └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_relay::config::{loader::read_config, validate_config, RelayConfig};
use cors_relay::lifecycle::{wait_for_signal, Shutdown};
use cors_relay::observability::init_logging;
use cors_relay::RelayServer;

#[derive(Parser)]
#[command(name = "cors-relay")]
#[command(about = "Development relay that forwards requests to one upstream and adds permissive CORS headers", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to accept connections on (overrides listener.bind_address).
    #[arg(short, long)]
    listen: Option<String>,

    /// Upstream base URL (overrides upstream.url).
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }
    if let Some(upstream) = cli.upstream {
        config.upstream.url = upstream;
    }
    validate_config(&config).map_err(cors_relay::config::ConfigError::from)?;

    init_logging(&config.observability);
    tracing::info!("cors-relay v{} starting", env!("CARGO_PKG_VERSION"));

    let bind_address: SocketAddr = config.listener.bind_address.parse()?;
    let server = RelayServer::new(config)?;
    let listener = TcpListener::bind(bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "CORS relay running at http://{}", local_addr);
    tracing::info!(upstream = %server.upstream(), "Proxying requests to {}", server.upstream());
    tracing::info!("Point the client at this address instead of the upstream; press Ctrl+C to stop");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
