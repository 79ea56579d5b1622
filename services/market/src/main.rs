//! Produce market HTTP server
//!
//! Run with: cargo run -p market --features cli -- --listen 127.0.0.1:8080

use std::net::SocketAddr;

use camino::Utf8PathBuf;
use clap::Parser;
use market::{MarketBuilder, MarketConfig};
use produce::Registry;
use tracing_subscriber::EnvFilter;

/// Serve the produce registry over HTTP
#[derive(Debug, Parser)]
#[command(name = "market-server", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,

    /// Address to listen on, overriding the configuration file
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MarketConfig::load(path)?,
        None => MarketConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app = MarketBuilder::new().registry(Registry::new()).build();

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!("Produce market listening on http://{}", config.listen);
    tracing::info!("Try: curl http://{}/fetch", config.listen);

    axum::serve(listener, app).await?;

    Ok(())
}
