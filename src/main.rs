//! Items client service.
//!
//! Serves the `/items/client` routes and forwards each call to the upstream
//! Items API at the configured base address.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use items_client::config::{load_or_default, Overrides};
use items_client::observability::{logging::init_logging, metrics::init_metrics};
use items_client::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "items-client")]
#[command(about = "REST passthrough to the upstream Items API", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the upstream base URL.
    #[arg(short, long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let overrides = Overrides {
        bind_address: args.bind,
        base_url: args.upstream,
    };
    let config = load_or_default(args.config.as_deref(), &overrides)?;

    init_logging(&config.observability);
    tracing::info!("items-client v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        connect_timeout_secs = ?config.timeouts.connect_secs,
        request_timeout_secs = ?config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;
    server.run(listener, Shutdown::new()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
