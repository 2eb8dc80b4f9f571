//! reqtap: an echo server that logs request metadata.
//!
//! ```text
//! GET /anything        → {"method","urlPath","time","unix","addr","user_agent"}
//! GET /delay?t=<secs>  → same, plus "delay", after sleeping (max 5s)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use reqtap::config::{check_config, load_config, ServerConfig};
use reqtap::http::HttpServer;
use reqtap::lifecycle::{wait_for_signal, Shutdown};
use reqtap::observability::{logging, sink};

#[derive(Parser)]
#[command(name = "reqtap")]
#[command(about = "Echo server that logs request metadata", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> reqtap::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    check_config(&config)?;

    logging::init_logging(&config.logging);
    tracing::info!("reqtap v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        sink = ?config.logging.sink,
        "Configuration loaded"
    );

    let sink = sink::from_config(&config.logging);
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, sink);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.trigger();
        }
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
