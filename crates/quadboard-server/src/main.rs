use anyhow::{Context, Result};
use clap::Parser;
use quadboard_server::ServerConfig;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("quadboard-server starting");
    info!("notes file: {}", config.notes_file.display());

    let store = quadboard_store::create_store(&config.store_config())
        .await
        .with_context(|| format!("failed to open {}", config.notes_file.display()))?;

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;

    quadboard_server::serve(listener, store).await
}
