//! Age-eligibility HTTP server.
//!
//! Stateless: every request carries the player, tournament, table and venue
//! snapshots to evaluate.

use std::net::SocketAddr;

use anyhow::Error;
use ap_server::{api, config::ServerConfig, logging, metrics};
use pico_args::Arguments;
use tracing::{info, warn};

const HELP: &str = "\
Run the tournament age-eligibility server

USAGE:
  ap_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address    [default: env SERVER_BIND or 127.0.0.1:6970]
  --metrics-bind  IP:PORT  Prometheus scrape address     [default: env METRICS_BIND, disabled if unset]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND                Server bind address (e.g., 0.0.0.0:8080)
  METRICS_BIND               Prometheus exporter bind address
  VENUE_UTC_OFFSET_MINUTES   Venue wall-clock offset from UTC  [default: 0]
  MAX_BATCH_PLAYERS          Player limit for batch checks     [default: 1000]
  MAX_BATCH_TABLES           Table limit for batch checks      [default: 200]
  RUST_LOG                   Log filter                        [default: info]
";

struct Args {
    bind: Option<SocketAddr>,
    metrics_bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.metrics_bind)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics available at http://{}/metrics", addr);
    }

    info!(
        "Venue UTC offset {} minutes, batch limits {} players / {} tables",
        config.venue_utc_offset_minutes, config.max_batch_players, config.max_batch_tables
    );

    let bind = config.bind;
    let app = api::create_router(api::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", bind, e))?;

    info!("Server is running at http://{}. Press Ctrl+C to stop.", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for CTRL+C, shutting down: {}", e);
    }
}
