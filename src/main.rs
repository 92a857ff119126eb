use clap::Parser;
use team_admin::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::TeamMembers => cli::team_members::run().await,
        Command::BallCollectors => cli::ball_collectors::run().await,
        Command::Orchestrate => cli::orchestrate::run().await,
    }
}
