//! Member service for team member management

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::member::{MemberId, MemberQuery, MemberRepository, Position, TeamMember};
use crate::domain::DomainError;

/// Request for creating a new member
#[derive(Debug, Clone)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: Option<Position>,
    pub date_of_birth: DateTime<Utc>,
    pub date_joined: DateTime<Utc>,
}

/// Request for updating a member; only provided fields change
#[derive(Debug, Clone, Default)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<Position>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub date_joined: Option<DateTime<Utc>>,
}

/// Member service enforcing email/phone uniqueness across the collection
#[derive(Debug)]
pub struct MemberService<R: MemberRepository> {
    repository: Arc<R>,
}

impl<R: MemberRepository> MemberService<R> {
    /// Create a new member service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new member with a freshly assigned ID
    pub async fn create(&self, request: CreateMemberRequest) -> Result<TeamMember, DomainError> {
        info!(name = %request.name, "Creating team member");

        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(DomainError::conflict(
                "A team member with this email already exists",
            ));
        }

        if self.repository.find_by_phone(&request.phone).await?.is_some() {
            return Err(DomainError::conflict(
                "A team member with this phone already exists",
            ));
        }

        let mut member = TeamMember::new(
            MemberId::generate(),
            &request.name,
            &request.email,
            &request.phone,
            request.date_of_birth,
            request.date_joined,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(position) = request.position {
            member = member.with_position(position);
        }

        self.repository.create(member).await
    }

    /// Get a member by ID
    pub async fn get(&self, id: &str) -> Result<Option<TeamMember>, DomainError> {
        let member_id = MemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.get(&member_id).await
    }

    /// List members matching the query
    pub async fn list(&self, query: Option<MemberQuery>) -> Result<Vec<TeamMember>, DomainError> {
        self.repository.list(&query.unwrap_or_default()).await
    }

    /// Count members matching the query
    pub async fn count(&self, query: Option<MemberQuery>) -> Result<usize, DomainError> {
        self.repository.count(&query.unwrap_or_default()).await
    }

    /// Update a member; only fields present in the request change
    pub async fn update(
        &self,
        id: &str,
        request: UpdateMemberRequest,
    ) -> Result<TeamMember, DomainError> {
        info!(id = %id, "Updating team member");

        let member_id = MemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut member = self
            .repository
            .get(&member_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team member '{}' not found", id)))?;

        if let Some(ref email) = request.email {
            if let Some(existing) = self.repository.find_by_email(email).await? {
                if existing.id() != &member_id {
                    return Err(DomainError::conflict(
                        "A team member with this email already exists",
                    ));
                }
            }
        }

        if let Some(ref phone) = request.phone {
            if let Some(existing) = self.repository.find_by_phone(phone).await? {
                if existing.id() != &member_id {
                    return Err(DomainError::conflict(
                        "A team member with this phone already exists",
                    ));
                }
            }
        }

        if let Some(name) = request.name {
            member
                .set_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(email) = request.email {
            member
                .set_email(email)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(phone) = request.phone {
            member
                .set_phone(phone)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(position) = request.position {
            member.set_position(Some(position));
        }

        if let Some(date_of_birth) = request.date_of_birth {
            member.set_date_of_birth(date_of_birth);
        }

        if let Some(date_joined) = request.date_joined {
            member.set_date_joined(date_joined);
        }

        self.repository.update(member).await
    }

    /// Delete a member, returning true if it existed
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting team member");

        let member_id = MemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.delete(&member_id).await
    }

    /// Check if a member exists
    pub async fn exists(&self, id: &str) -> Result<bool, DomainError> {
        let member_id = MemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.exists(&member_id).await
    }
}
