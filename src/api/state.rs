//! Application state for shared services

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::assignment::{AssignmentQuery, AssignmentRepository, BallCollectorAssignment};
use crate::domain::directory::MemberDirectory;
use crate::domain::member::{MemberQuery, MemberRepository, TeamMember};
use crate::domain::DomainError;
use crate::infrastructure::assignment::{
    AssignmentService, CreateAssignmentRequest, ReminderSummary, UpdateAssignmentRequest,
};
use crate::infrastructure::member::{CreateMemberRequest, MemberService, UpdateMemberRequest};

/// State of the Team Members Service, using dynamic dispatch
#[derive(Clone)]
pub struct MembersState {
    pub member_service: Arc<dyn MemberServiceTrait>,
}

/// State of the Ball Collectors Service, using dynamic dispatch
#[derive(Clone)]
pub struct CollectorsState {
    pub assignment_service: Arc<dyn AssignmentServiceTrait>,
    pub directory: Arc<dyn MemberDirectory>,
}

/// Trait for member service operations
#[async_trait::async_trait]
pub trait MemberServiceTrait: Send + Sync {
    async fn create(&self, request: CreateMemberRequest) -> Result<TeamMember, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<TeamMember>, DomainError>;
    async fn list(&self, query: Option<MemberQuery>) -> Result<Vec<TeamMember>, DomainError>;
    async fn update(
        &self,
        id: &str,
        request: UpdateMemberRequest,
    ) -> Result<TeamMember, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}

#[async_trait::async_trait]
impl<R: MemberRepository + 'static> MemberServiceTrait for MemberService<R> {
    async fn create(&self, request: CreateMemberRequest) -> Result<TeamMember, DomainError> {
        MemberService::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Option<TeamMember>, DomainError> {
        MemberService::get(self, id).await
    }

    async fn list(&self, query: Option<MemberQuery>) -> Result<Vec<TeamMember>, DomainError> {
        MemberService::list(self, query).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateMemberRequest,
    ) -> Result<TeamMember, DomainError> {
        MemberService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        MemberService::delete(self, id).await
    }
}

/// Trait for assignment service operations
#[async_trait::async_trait]
pub trait AssignmentServiceTrait: Send + Sync {
    async fn create(
        &self,
        request: CreateAssignmentRequest,
    ) -> Result<BallCollectorAssignment, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<BallCollectorAssignment>, DomainError>;
    async fn list(
        &self,
        query: Option<AssignmentQuery>,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError>;
    async fn update(
        &self,
        id: &str,
        request: UpdateAssignmentRequest,
    ) -> Result<BallCollectorAssignment, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn week_from(&self, day: NaiveDate)
        -> Result<Vec<BallCollectorAssignment>, DomainError>;
    async fn current(&self) -> Result<Vec<BallCollectorAssignment>, DomainError>;
    async fn upcoming(&self) -> Result<Vec<BallCollectorAssignment>, DomainError>;
    async fn reminder(&self) -> Result<ReminderSummary, DomainError>;
}

#[async_trait::async_trait]
impl<R: AssignmentRepository + 'static> AssignmentServiceTrait for AssignmentService<R> {
    async fn create(
        &self,
        request: CreateAssignmentRequest,
    ) -> Result<BallCollectorAssignment, DomainError> {
        AssignmentService::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Option<BallCollectorAssignment>, DomainError> {
        AssignmentService::get(self, id).await
    }

    async fn list(
        &self,
        query: Option<AssignmentQuery>,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        AssignmentService::list(self, query).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateAssignmentRequest,
    ) -> Result<BallCollectorAssignment, DomainError> {
        AssignmentService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        AssignmentService::delete(self, id).await
    }

    async fn week_from(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        AssignmentService::week_from(self, day).await
    }

    async fn current(&self) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        AssignmentService::current(self).await
    }

    async fn upcoming(&self) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        AssignmentService::upcoming(self).await
    }

    async fn reminder(&self) -> Result<ReminderSummary, DomainError> {
        AssignmentService::reminder(self).await
    }
}
