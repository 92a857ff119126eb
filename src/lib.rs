//! Team administration platform
//!
//! Two cooperating CRUD services over a shared document database:
//! - the Team Members Service owns the `team_members` collection;
//! - the Ball Collectors Service owns the `ball_collectors` collection and
//!   validates member references against the Team Members Service.
//!
//! The `orchestrate` subcommand runs both in one process behind
//! health-gated startup sequencing (datastore, then members, then
//! collectors).

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use mongodb::Database;
use tracing::info;

use api::state::{CollectorsState, MembersState};
use domain::assignment::BallCollectorAssignment;
use domain::directory::MemberDirectory;
use domain::member::TeamMember;
use domain::storage::{Storage, StorageEntity};
use infrastructure::assignment::{AssignmentService, StorageAssignmentRepository};
use infrastructure::directory::HttpMemberDirectory;
use infrastructure::member::{MemberService, StorageMemberRepository};
use infrastructure::storage::{self, StorageFactory, StorageType};

fn storage_backend(config: &AppConfig) -> StorageType {
    StorageType::from_str(&config.datastore.backend).unwrap_or(StorageType::Mongo)
}

async fn create_storage<E>(
    config: &AppConfig,
    database: Option<&Database>,
    collection: &str,
) -> anyhow::Result<Arc<dyn Storage<E>>>
where
    E: StorageEntity + 'static,
{
    match storage_backend(config) {
        StorageType::InMemory => {
            info!(collection, "Using in-memory storage");
            Ok(StorageFactory::create_in_memory::<E>())
        }
        StorageType::Mongo => {
            let connected;
            let database = match database {
                Some(database) => database,
                None => {
                    connected = storage::connect(&config.datastore).await?;
                    &connected
                }
            };

            info!(collection, "Using MongoDB storage");
            Ok(StorageFactory::create_mongo_with_database::<E>(
                database, collection,
            ))
        }
    }
}

/// Build the Team Members Service state. An already-established database
/// handle can be passed in so the orchestrator connects only once.
pub async fn create_members_state(
    config: &AppConfig,
    database: Option<&Database>,
) -> anyhow::Result<MembersState> {
    let storage = create_storage::<TeamMember>(
        config,
        database,
        &config.datastore.members_collection,
    )
    .await?;

    let repository = Arc::new(StorageMemberRepository::new(storage));

    Ok(MembersState {
        member_service: Arc::new(MemberService::new(repository)),
    })
}

/// Build the Ball Collectors Service state, wired to the upstream Team
/// Members Service named by `config.upstream`.
pub async fn create_collectors_state(
    config: &AppConfig,
    database: Option<&Database>,
) -> anyhow::Result<CollectorsState> {
    let storage = create_storage::<BallCollectorAssignment>(
        config,
        database,
        &config.datastore.assignments_collection,
    )
    .await?;

    let directory: Arc<dyn MemberDirectory> =
        Arc::new(HttpMemberDirectory::new(&config.upstream)?);

    info!(
        upstream = %config.upstream.team_members_url,
        "Ball collectors upstream configured"
    );

    let repository = Arc::new(StorageAssignmentRepository::new(storage));

    Ok(CollectorsState {
        assignment_service: Arc::new(AssignmentService::new(repository, directory.clone())),
        directory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.datastore.backend = "memory".to_string();
        config
    }

    #[tokio::test]
    async fn test_create_members_state_in_memory() {
        let state = create_members_state(&memory_config(), None).await.unwrap();
        let members = state.member_service.list(None).await.unwrap();
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_create_collectors_state_in_memory() {
        let state = create_collectors_state(&memory_config(), None)
            .await
            .unwrap();
        let assignments = state.assignment_service.list(None).await.unwrap();
        assert!(assignments.is_empty());
    }
}
