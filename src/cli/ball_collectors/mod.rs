//! Ball Collectors Service subcommand

use tokio::net::TcpListener;
use tracing::info;

use crate::api::collectors_router;
use crate::cli::{build_socket_addr, shutdown_signal};
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

/// Run the Ball Collectors Service
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    // Per-process collection override, as the deployment manifests set it
    if let Ok(collection) = std::env::var("COLLECTION") {
        config.datastore.assignments_collection = collection;
    }

    let state = crate::create_collectors_state(&config, None).await?;
    let app = collectors_router(state);

    let addr = build_socket_addr(&config.ball_collectors.host, config.ball_collectors.port)?;
    info!("Starting Ball Collectors Service on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Ball Collectors Service shutdown complete");

    Ok(())
}
