//! FS22 dedicated-server feed relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                  RELAY                       │
//!     Client Request       │  ┌─────────┐    ┌───────────┐    ┌─────────┐ │
//!     ─────────────────────┼─▶│  http   │───▶│  relay    │───▶│upstream │─┼──▶ FS22 server
//!                          │  │ server  │    │ handlers  │    │ client  │ │    /feed/...
//!     Client Response      │  │ + CORS  │    │ (routes)  │    │(reqwest)│ │
//!     ◀────────────────────┼──│response │◀───│RelayResult│◀───│         │◀┼─── XML / JPEG
//!                          │  └─────────┘    └───────────┘    └─────────┘ │
//!                          │  ┌────────────────────────────────────────┐  │
//!                          │  │ config │ observability │ lifecycle     │  │
//!                          │  └────────────────────────────────────────┘  │
//!                          └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::net::TcpListener;

use fs22_relay::config::load_from_env;
use fs22_relay::lifecycle::Shutdown;
use fs22_relay::observability::{logging, metrics};
use fs22_relay::HttpServer;

#[derive(Parser)]
#[command(name = "fs22-relay")]
#[command(about = "Relays FS22 dedicated-server feed data with permissive CORS", long_about = None)]
struct Cli {
    /// Optional TOML file; environment variables override its values.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is not up yet, so config problems go straight to stderr.
    let config = match load_from_env(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("CRITICAL ERROR: {}", e);
            return ExitCode::from(1);
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("fs22-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        upstream = ?config.upstream,
        listen_port = config.listener.port,
        "Configuration loaded"
    );

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay terminated");
            eprintln!("CRITICAL ERROR: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(config: fs22_relay::RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr.parse()?;
        metrics::init_metrics(addr)?;
    }

    let bind_address = config.listener.bind_address();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Proxy listening");

    server.run(listener, Shutdown::new().trigger_on_signal()).await?;
    Ok(())
}
