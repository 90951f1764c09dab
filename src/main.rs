//! share-edge entry point.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 SHARE-EDGE                   │
//!                      │                                              │
//!   Page Request       │  ┌────────┐   ┌─────────┐   ┌────────────┐  │
//!   ───────────────────┼─▶│  http  │──▶│ routing │──▶│   social   │  │
//!                      │  │ server │   │ parser  │   │ dispatch   │  │
//!   /social-image      │  └────────┘   └─────────┘   └─────┬──────┘  │
//!   ───────────────────┼──────▲                            │         │
//!                      │      │                            ▼         │
//!                      │      │                      ┌───────────┐   │     ┌──────────┐
//!                      │      │                      │    api    │───┼────▶│ REST API │
//!                      │      │                      │  client   │   │     └──────────┘
//!                      │      │                      └───────────┘   │
//!                      │      │        ┌────────────────────────┐    │     ┌──────────┐
//!                      │      └────────│  head template / svg   │    │     │SPA origin│
//!                      │               └────────────────────────┘    │◀───▶└──────────┘
//!                      │                                              │
//!                      │  Cross-cutting: config, observability        │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use share_edge::config::{load_config, EdgeConfig};
use share_edge::http::HttpServer;
use share_edge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "share-edge")]
#[command(about = "Social-preview edge service", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_origin = %config.upstream.origin,
        api_base_url = %config.api.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
