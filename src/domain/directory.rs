//! Member directory port
//!
//! The Ball Collectors Service resolves member references through this
//! trait instead of reading the `team_members` collection directly; the
//! Team Members Service keeps exclusive write and read ownership of its
//! own data.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::member::MemberId;
use crate::domain::DomainError;

/// The subset of a team member the collectors side needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: MemberId,
    pub name: String,
    pub email: String,
}

/// Lookup of team members owned by another service
#[async_trait]
pub trait MemberDirectory: Send + Sync + std::fmt::Debug {
    /// Resolve a member by ID. `Ok(None)` means the upstream answered and
    /// the member does not exist; `Err(Upstream)` means the upstream could
    /// not be reached or gave an unusable answer.
    async fn find_member(&self, id: &MemberId) -> Result<Option<MemberSummary>, DomainError>;

    /// Check that the upstream service is reachable and healthy
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory directory for testing; can simulate an unreachable upstream
    #[derive(Debug, Default)]
    pub struct MockMemberDirectory {
        members: RwLock<HashMap<String, MemberSummary>>,
        unreachable: RwLock<bool>,
    }

    impl MockMemberDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_member(self, summary: MemberSummary) -> Self {
            self.members
                .write()
                .unwrap()
                .insert(summary.id.as_str().to_string(), summary);
            self
        }

        /// Make every lookup fail as if the upstream were down
        pub fn unreachable(self) -> Self {
            *self.unreachable.write().unwrap() = true;
            self
        }
    }

    #[async_trait]
    impl MemberDirectory for MockMemberDirectory {
        async fn find_member(
            &self,
            id: &MemberId,
        ) -> Result<Option<MemberSummary>, DomainError> {
            if *self.unreachable.read().unwrap() {
                return Err(DomainError::upstream("team_members", "connection refused"));
            }

            Ok(self.members.read().unwrap().get(id.as_str()).cloned())
        }

        async fn ping(&self) -> Result<(), DomainError> {
            if *self.unreachable.read().unwrap() {
                return Err(DomainError::upstream("team_members", "connection refused"));
            }

            Ok(())
        }
    }
}
