//! Orchestrate subcommand: both services in one process, started in
//! dependency order behind readiness gates.
//!
//! Sequencing: the datastore must answer a ping before the Team Members
//! Service is started; the Team Members Service must answer its readiness
//! endpoint before the Ball Collectors Service is started. A gate that
//! exhausts its attempt budget is fatal - dependents are never started and
//! the process exits non-zero.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::Router;
use mongodb::Database;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{collectors_router, members_router};
use crate::cli::{build_socket_addr, shutdown_signal};
use crate::config::AppConfig;
use crate::domain::readiness::GatePolicy;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::readiness::{HealthGate, HttpServiceProbe, MongoPingProbe};
use crate::infrastructure::storage::{self, StorageType};

/// Run the platform with health-gated startup
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    let gate = HealthGate::new(GatePolicy {
        interval: Duration::from_millis(config.gate.interval_ms),
        max_attempts: config.gate.max_attempts,
    });

    // Stage 1: the datastore must be healthy before anything starts
    let database = gate_datastore(&config, &gate).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Stage 2: Team Members Service
    let members_state = crate::create_members_state(&config, database.as_ref()).await?;
    let members_addr = build_socket_addr(&config.team_members.host, config.team_members.port)?;
    let members_listener = TcpListener::bind(members_addr).await?;
    let members_local = probe_addr(members_listener.local_addr()?);

    info!("Starting Team Members Service on {}", members_addr);
    let mut members_task = spawn_service(
        "team_members",
        members_listener,
        members_router(members_state),
        shutdown_rx.clone(),
    );

    let members_probe =
        HttpServiceProbe::new("team_members", format!("http://{}/ready", members_local));

    if let Err(e) = gate.await_healthy(&members_probe).await {
        let _ = shutdown_tx.send(true);
        let _ = members_task.await;
        anyhow::bail!("{}; ball collectors service was not started", e);
    }

    // Stage 3: Ball Collectors Service, wired to the members instance we
    // just started rather than whatever the split-process deployment var says
    config.upstream.team_members_url = format!("http://{}", members_local);

    let collectors_state = crate::create_collectors_state(&config, database.as_ref()).await?;
    let collectors_addr =
        build_socket_addr(&config.ball_collectors.host, config.ball_collectors.port)?;
    let collectors_listener = TcpListener::bind(collectors_addr).await?;
    let collectors_local = probe_addr(collectors_listener.local_addr()?);

    info!("Starting Ball Collectors Service on {}", collectors_addr);
    let mut collectors_task = spawn_service(
        "ball_collectors",
        collectors_listener,
        collectors_router(collectors_state),
        shutdown_rx,
    );

    let collectors_probe = HttpServiceProbe::new(
        "ball_collectors",
        format!("http://{}/ready", collectors_local),
    );

    if let Err(e) = gate.await_healthy(&collectors_probe).await {
        let _ = shutdown_tx.send(true);
        let _ = members_task.await;
        let _ = collectors_task.await;
        anyhow::bail!("{}", e);
    }

    info!(
        team_members = %members_local,
        ball_collectors = %collectors_local,
        "Platform ready"
    );

    enum Exit {
        Signal,
        Members(String),
        Collectors(String),
    }

    let exit = tokio::select! {
        _ = shutdown_signal() => Exit::Signal,
        result = &mut members_task => Exit::Members(format!("{:?}", result)),
        result = &mut collectors_task => Exit::Collectors(format!("{:?}", result)),
    };

    let _ = shutdown_tx.send(true);

    match exit {
        Exit::Signal => {
            let _ = members_task.await;
            let _ = collectors_task.await;
            info!("Platform shutdown complete");
            Ok(())
        }
        Exit::Members(result) => {
            let _ = collectors_task.await;
            anyhow::bail!("Team members service exited unexpectedly: {}", result)
        }
        Exit::Collectors(result) => {
            let _ = members_task.await;
            anyhow::bail!("Ball collectors service exited unexpectedly: {}", result)
        }
    }
}

/// Gate on the datastore. With the in-memory backend there is no external
/// datastore to wait for and no database handle to share.
async fn gate_datastore(
    config: &AppConfig,
    gate: &HealthGate,
) -> anyhow::Result<Option<Database>> {
    match StorageType::from_str(&config.datastore.backend).unwrap_or(StorageType::Mongo) {
        StorageType::InMemory => {
            info!("In-memory backend configured, skipping datastore gate");
            Ok(None)
        }
        StorageType::Mongo => {
            let database = storage::connect(&config.datastore).await?;

            gate.await_healthy(&MongoPingProbe::new(database.clone()))
                .await
                .map_err(|e| {
                    anyhow::anyhow!("{}; team members service was not started", e)
                })?;

            Ok(Some(database))
        }
    }
}

/// Serve one service until the shared shutdown flag flips
fn spawn_service(
    name: &'static str,
    listener: TcpListener,
    app: Router,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(|stop| *stop).await;
            })
            .await?;

        info!("{} server stopped", name);
        Ok(())
    })
}

/// Address to probe a just-bound listener on; a wildcard bind is only
/// reachable via loopback from inside the same process.
fn probe_addr(addr: SocketAddr) -> SocketAddr {
    if addr.ip().is_unspecified() {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
    } else {
        addr
    }
}
