//! CLI module for the team administration platform
//!
//! Provides subcommands for the runnable surfaces:
//! - `team-members`: the Team Members CRUD service
//! - `ball-collectors`: the Ball Collectors CRUD service
//! - `orchestrate`: both services in one process with health-gated startup

pub mod ball_collectors;
pub mod orchestrate;
pub mod team_members;

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::info;

/// Team administration platform - CRUD services with health-gated startup
#[derive(Parser)]
#[command(name = "team-admin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the Team Members Service
    TeamMembers,

    /// Run the Ball Collectors Service
    BallCollectors,

    /// Run both services with health-gated startup sequencing
    Orchestrate,
}

pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

pub(crate) fn build_socket_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((host.parse::<std::net::IpAddr>()?, port)))
}
