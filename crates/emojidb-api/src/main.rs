use anyhow::Result;
use emojidb_api::config::ApiConfig;
use emojidb_api::{router, telemetry, AppState};
use emojidb_store::{open_service, StoreConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = ApiConfig::from_env()?;
    telemetry::init(cfg.log_json);

    let service = open_service(StoreConfig::local(&cfg.asset_dir), cfg.core.clone())?;
    // An unreadable directory is fatal; fail at boot rather than on every request.
    let snapshot = service.snapshot()?;
    info!(
        asset_dir = %cfg.asset_dir.display(),
        identifiers = snapshot.len(),
        files = snapshot.file_count(),
        hash = %cfg.core.hashing.algorithm,
        "asset directory ready"
    );

    let app = router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    info!(addr = %cfg.bind_addr, "emojidb-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    info!("shutting down");
}
