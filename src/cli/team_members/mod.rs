//! Team Members Service subcommand

use tokio::net::TcpListener;
use tracing::info;

use crate::api::members_router;
use crate::cli::{build_socket_addr, shutdown_signal};
use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

/// Run the Team Members Service
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    // Per-process collection override, as the deployment manifests set it
    if let Ok(collection) = std::env::var("COLLECTION") {
        config.datastore.members_collection = collection;
    }

    let state = crate::create_members_state(&config, None).await?;
    let app = members_router(state);

    let addr = build_socket_addr(&config.team_members.host, config.team_members.port)?;
    info!("Starting Team Members Service on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Team Members Service shutdown complete");

    Ok(())
}
