//! Assignment repository trait

use async_trait::async_trait;
use chrono::NaiveDate;

use super::entity::{AssignmentId, BallCollectorAssignment};
use crate::domain::member::MemberId;
use crate::domain::DomainError;

/// Query parameters for listing assignments
#[derive(Debug, Clone, Default)]
pub struct AssignmentQuery {
    /// Filter by assigned member
    pub member_id: Option<MemberId>,
    /// Only assignments on or after this date
    pub from: Option<NaiveDate>,
    /// Only assignments strictly before this date
    pub until: Option<NaiveDate>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl AssignmentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
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

/// Repository for managing ball collector assignments
#[async_trait]
pub trait AssignmentRepository: Send + Sync + std::fmt::Debug {
    /// Get an assignment by ID
    async fn get(&self, id: &AssignmentId) -> Result<Option<BallCollectorAssignment>, DomainError>;

    /// Create a new assignment
    async fn create(
        &self,
        assignment: BallCollectorAssignment,
    ) -> Result<BallCollectorAssignment, DomainError>;

    /// Update an existing assignment
    async fn update(
        &self,
        assignment: BallCollectorAssignment,
    ) -> Result<BallCollectorAssignment, DomainError>;

    /// Delete an assignment by ID
    async fn delete(&self, id: &AssignmentId) -> Result<bool, DomainError>;

    /// List assignments matching the query, sorted by date ascending
    async fn list(
        &self,
        query: &AssignmentQuery,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError>;

    /// Count assignments matching the query
    async fn count(&self, query: &AssignmentQuery) -> Result<usize, DomainError>;

    /// Find the assignment for a member on a specific date, if any
    async fn find_for_member_on(
        &self,
        member_id: &MemberId,
        date: NaiveDate,
    ) -> Result<Option<BallCollectorAssignment>, DomainError>;
}
