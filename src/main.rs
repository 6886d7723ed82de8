//! API Gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                   API GATEWAY                    │
//!                      │                                                  │
//!   Client Request     │  ┌──────────┐   ┌──────────┐   ┌─────────────┐   │
//!   ───────────────────┼─▶│ CORS +   │──▶│ security │──▶│  routing    │   │
//!                      │  │ preflight│   │ X-API-Key│   │ /orders     │   │
//!                      │  └──────────┘   └────┬─────┘   │ /analytics  │   │
//!                      │                      │ 401     └──────┬──────┘   │
//!                      │                      ▼                │ 404      │
//!                      │                                       ▼          │
//!   Client Response    │  ┌──────────┐   ┌──────────┐   ┌─────────────┐   │
//!   ◀──────────────────┼──│ response │◀──│ upstream │◀──│  upstream   │◀──┼── orders /
//!                      │  │ sanitize │   │ client   │   │  target     │   │   analytics
//!                      │  └──────────┘   └──────────┘   └─────────────┘   │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_gateway::config::load_config;
use api_gateway::lifecycle::{signals, Shutdown};
use api_gateway::observability::{logging, metrics};
use api_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "API key authenticating reverse proxy for the orders and analytics services", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override its values.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = logging::LogFormat::Pretty)]
    log_format: logging::LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.log_format);

    tracing::info!("api-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration, refusing to start");
            return Err(e.into());
        }
    };

    tracing::info!(
        listen_address = %config.listen_address,
        orders = %config.orders_upstream_url,
        analytics = %config.analytics_upstream_url,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(server.config().bind_address()).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
