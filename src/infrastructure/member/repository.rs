//! Storage-backed member repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::member::{MemberId, MemberQuery, MemberRepository, TeamMember};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Storage-backed implementation of MemberRepository
#[derive(Debug)]
pub struct StorageMemberRepository {
    storage: Arc<dyn Storage<TeamMember>>,
}

impl StorageMemberRepository {
    /// Create a new storage-backed repository
    pub fn new(storage: Arc<dyn Storage<TeamMember>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl MemberRepository for StorageMemberRepository {
    async fn get(&self, id: &MemberId) -> Result<Option<TeamMember>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, member: TeamMember) -> Result<TeamMember, DomainError> {
        if self.storage.exists(member.id()).await? {
            return Err(DomainError::conflict(format!(
                "Member '{}' already exists",
                member.id()
            )));
        }

        self.storage.create(member).await
    }

    async fn update(&self, member: TeamMember) -> Result<TeamMember, DomainError> {
        if !self.storage.exists(member.id()).await? {
            return Err(DomainError::not_found(format!(
                "Member '{}' not found",
                member.id()
            )));
        }

        self.storage.update(member).await
    }

    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list(&self, query: &MemberQuery) -> Result<Vec<TeamMember>, DomainError> {
        let all_members = self.storage.list().await?;
        let mut result: Vec<TeamMember> =
            filter_members(all_members.iter(), query).cloned().collect();

        // Sort by name
        result.sort_by(|a, b| a.name().cmp(b.name()));

        // Apply pagination
        let offset = query.offset.unwrap_or(0);

        if offset < result.len() {
            result = result.into_iter().skip(offset).collect();
        } else {
            result.clear();
        }

        if let Some(limit) = query.limit {
            result.truncate(limit);
        }

        Ok(result)
    }

    async fn count(&self, query: &MemberQuery) -> Result<usize, DomainError> {
        let all_members = self.storage.list().await?;
        Ok(filter_members(all_members.iter(), query).count())
    }

    async fn exists(&self, id: &MemberId) -> Result<bool, DomainError> {
        self.storage.exists(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TeamMember>, DomainError> {
        let all_members = self.storage.list().await?;
        Ok(all_members.into_iter().find(|m| m.email() == email))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<TeamMember>, DomainError> {
        let all_members = self.storage.list().await?;
        Ok(all_members.into_iter().find(|m| m.phone() == phone))
    }
}

fn filter_members<'a>(
    members: impl Iterator<Item = &'a TeamMember>,
    query: &MemberQuery,
) -> impl Iterator<Item = &'a TeamMember> {
    let position = query.position;

    members.filter(move |member| match position {
        Some(position) => member.position() == Some(position),
        None => true,
    })
}
