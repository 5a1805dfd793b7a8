use anyhow::Context;
use clap::Parser;
use stockroom::config::{CliArgs, ServerConfig};
use stockroom::http::{self, AppState};
use stockroom::lifecycle::{setup_tracing, InventorySystem};
use stockroom::storage::SqliteStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_args(CliArgs::parse())?;
    setup_tracing(config.log_format);

    let store = match &config.database {
        Some(path) => SqliteStore::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?,
        None => {
            warn!("No database configured, data lives in memory only");
            SqliteStore::open_in_memory().context("failed to open in-memory database")?
        }
    };

    let system = InventorySystem::with_store(store, config.actors)
        .context("failed to load inventory")?;
    let app = http::router(AppState::new(&system).context("failed to compile page templates")?);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(bind = %listener.local_addr()?, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Could not listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
            info!("Ctrl-C received");
        })
        .await
        .context("server error")?;

    system.shutdown().await.context("actor task failed")?;
    Ok(())
}
