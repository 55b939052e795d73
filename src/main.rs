use anyhow::Result;
use dotenvy::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use menomap_cycles::clock::SystemClock;
use menomap_cycles::config::Config;
use menomap_cycles::storage::{MemoryStorage, PgStorage, Storage};
use menomap_cycles::{app, CycleTracker};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let storage: Arc<dyn Storage> = match &config.database_url {
        Some(url) => Arc::new(PgStorage::connect(url).await?),
        None => {
            tracing::warn!("⚠️ DATABASE_URL not set, cycle data is kept in memory only");
            Arc::new(MemoryStorage::new())
        }
    };

    let tracker = Arc::new(CycleTracker::new(
        storage,
        Arc::new(SystemClock),
        config.thresholds,
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🧠 Server running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app(tracker).into_make_service(),
    )
    .await?;

    Ok(())
}
