//! Member repository trait

use async_trait::async_trait;

use super::entity::{MemberId, Position, TeamMember};
use crate::domain::DomainError;

/// Query parameters for listing members
#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    /// Filter by playing position
    pub position: Option<Position>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl MemberQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Repository for managing team members
#[async_trait]
pub trait MemberRepository: Send + Sync + std::fmt::Debug {
    /// Get a member by ID
    async fn get(&self, id: &MemberId) -> Result<Option<TeamMember>, DomainError>;

    /// Create a new member
    async fn create(&self, member: TeamMember) -> Result<TeamMember, DomainError>;

    /// Update an existing member
    async fn update(&self, member: TeamMember) -> Result<TeamMember, DomainError>;

    /// Delete a member by ID
    async fn delete(&self, id: &MemberId) -> Result<bool, DomainError>;

    /// List members matching the query
    async fn list(&self, query: &MemberQuery) -> Result<Vec<TeamMember>, DomainError>;

    /// Count members matching the query
    async fn count(&self, query: &MemberQuery) -> Result<usize, DomainError>;

    /// Check if a member exists
    async fn exists(&self, id: &MemberId) -> Result<bool, DomainError>;

    /// Find a member by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<TeamMember>, DomainError>;

    /// Find a member by exact phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<TeamMember>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Mock implementation for testing
    #[derive(Debug, Default)]
    pub struct MockMemberRepository {
        members: RwLock<HashMap<String, TeamMember>>,
    }

    impl MockMemberRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl MemberRepository for MockMemberRepository {
        async fn get(&self, id: &MemberId) -> Result<Option<TeamMember>, DomainError> {
            let members = self.members.read().unwrap();
            Ok(members.get(id.as_str()).cloned())
        }

        async fn create(&self, member: TeamMember) -> Result<TeamMember, DomainError> {
            let mut members = self.members.write().unwrap();

            if members.contains_key(member.id().as_str()) {
                return Err(DomainError::conflict(format!(
                    "Member '{}' already exists",
                    member.id()
                )));
            }

            members.insert(member.id().as_str().to_string(), member.clone());
            Ok(member)
        }

        async fn update(&self, member: TeamMember) -> Result<TeamMember, DomainError> {
            let mut members = self.members.write().unwrap();

            if !members.contains_key(member.id().as_str()) {
                return Err(DomainError::not_found(format!(
                    "Member '{}' not found",
                    member.id()
                )));
            }

            members.insert(member.id().as_str().to_string(), member.clone());
            Ok(member)
        }

        async fn delete(&self, id: &MemberId) -> Result<bool, DomainError> {
            let mut members = self.members.write().unwrap();
            Ok(members.remove(id.as_str()).is_some())
        }

        async fn list(&self, query: &MemberQuery) -> Result<Vec<TeamMember>, DomainError> {
            let members = self.members.read().unwrap();
            let mut result: Vec<TeamMember> = members.values().cloned().collect();

            if let Some(position) = query.position {
                result.retain(|m| m.position() == Some(position));
            }

            result.sort_by(|a, b| a.name().cmp(b.name()));

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
            let members = self.members.read().unwrap();
            let count = members
                .values()
                .filter(|m| match query.position {
                    Some(position) => m.position() == Some(position),
                    None => true,
                })
                .count();
            Ok(count)
        }

        async fn exists(&self, id: &MemberId) -> Result<bool, DomainError> {
            let members = self.members.read().unwrap();
            Ok(members.contains_key(id.as_str()))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<TeamMember>, DomainError> {
            let members = self.members.read().unwrap();
            Ok(members.values().find(|m| m.email() == email).cloned())
        }

        async fn find_by_phone(&self, phone: &str) -> Result<Option<TeamMember>, DomainError> {
            let members = self.members.read().unwrap();
            Ok(members.values().find(|m| m.phone() == phone).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockMemberRepository;
    use super::*;

    fn member(name: &str, email: &str, phone: &str) -> TeamMember {
        TeamMember::new(
            MemberId::generate(),
            name,
            email,
            phone,
            "1990-04-12T00:00:00Z".parse().unwrap(),
            "2024-01-15T00:00:00Z".parse().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_create_and_get() {
        let repo = MockMemberRepository::new();
        let m = member("Alice Johnson", "alice@example.com", "5550100");
        let id = m.id().clone();

        repo.create(m).await.unwrap();

        let fetched = repo.get(&id).await.unwrap();
        assert_eq!(fetched.unwrap().name(), "Alice Johnson");
    }

    #[tokio::test]
    async fn test_mock_find_by_email() {
        let repo = MockMemberRepository::new();
        repo.create(member("Alice Johnson", "alice@example.com", "5550100"))
            .await
            .unwrap();

        let found = repo.find_by_email("alice@example.com").await.unwrap();
        assert!(found.is_some());

        let missing = repo.find_by_email("bob@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_mock_list_filters_position() {
        let repo = MockMemberRepository::new();
        repo.create(
            member("Alice Johnson", "alice@example.com", "5550100")
                .with_position(Position::Forward),
        )
        .await
        .unwrap();
        repo.create(
            member("Bob Smith", "bob@example.com", "5550101")
                .with_position(Position::Defender),
        )
        .await
        .unwrap();

        let query = MemberQuery::new().with_position(Position::Forward);
        let result = repo.list(&query).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name(), "Alice Johnson");
    }

    #[tokio::test]
    async fn test_mock_delete_twice() {
        let repo = MockMemberRepository::new();
        let m = member("Alice Johnson", "alice@example.com", "5550100");
        let id = m.id().clone();

        repo.create(m).await.unwrap();

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
    }
}
