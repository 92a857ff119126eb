//! Assignment service for ball collector management
//!
//! Writes that reference a team member are validated against the Team
//! Members Service before anything is persisted. If the upstream cannot be
//! reached the write fails closed; an unvalidated reference is never
//! stored.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::assignment::{
    AssignmentId, AssignmentQuery, AssignmentRepository, BallCollectorAssignment,
};
use crate::domain::directory::MemberDirectory;
use crate::domain::member::MemberId;
use crate::domain::DomainError;

/// Length of the "current week" window, in days
const WEEK_WINDOW_DAYS: u64 = 7;

/// Request for creating a new assignment
#[derive(Debug, Clone)]
pub struct CreateAssignmentRequest {
    pub member_id: String,
    pub assignment_date: NaiveDate,
}

/// Request for updating an assignment; only provided fields change
#[derive(Debug, Clone, Default)]
pub struct UpdateAssignmentRequest {
    pub member_id: Option<String>,
    pub assignment_date: Option<NaiveDate>,
}

/// One line of a composed reminder
#[derive(Debug, Clone)]
pub struct ReminderEntry {
    pub member_id: MemberId,
    /// Resolved member name; `None` when the member can no longer be found
    pub name: Option<String>,
}

/// Composed reminder for the current week's collectors
#[derive(Debug, Clone)]
pub struct ReminderSummary {
    pub message: String,
    pub entries: Vec<ReminderEntry>,
}

/// Assignment service owning the `ball_collectors` collection
#[derive(Debug)]
pub struct AssignmentService<R: AssignmentRepository> {
    repository: Arc<R>,
    directory: Arc<dyn MemberDirectory>,
}

impl<R: AssignmentRepository> AssignmentService<R> {
    /// Create a new assignment service
    pub fn new(repository: Arc<R>, directory: Arc<dyn MemberDirectory>) -> Self {
        Self {
            repository,
            directory,
        }
    }

    /// Resolve and validate a member reference against the upstream service.
    /// Fails closed: an unreachable upstream propagates as an upstream error.
    async fn require_member(&self, id: &str) -> Result<MemberId, DomainError> {
        let member_id = MemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        match self.directory.find_member(&member_id).await? {
            Some(_) => Ok(member_id),
            None => Err(DomainError::validation(format!(
                "Team member '{}' does not exist in the team members service",
                id
            ))),
        }
    }

    /// Create a new assignment with a freshly assigned ID
    pub async fn create(
        &self,
        request: CreateAssignmentRequest,
    ) -> Result<BallCollectorAssignment, DomainError> {
        info!(
            member_id = %request.member_id,
            date = %request.assignment_date,
            "Creating ball collector assignment"
        );

        let member_id = self.require_member(&request.member_id).await?;

        if self
            .repository
            .find_for_member_on(&member_id, request.assignment_date)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "An assignment for this member on this date already exists",
            ));
        }

        let assignment = BallCollectorAssignment::new(
            AssignmentId::generate(),
            member_id,
            request.assignment_date,
        );

        self.repository.create(assignment).await
    }

    /// Get an assignment by ID
    pub async fn get(&self, id: &str) -> Result<Option<BallCollectorAssignment>, DomainError> {
        let assignment_id =
            AssignmentId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.get(&assignment_id).await
    }

    /// List assignments matching the query
    pub async fn list(
        &self,
        query: Option<AssignmentQuery>,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        self.repository.list(&query.unwrap_or_default()).await
    }

    /// Update an assignment; a changed member reference is re-validated
    pub async fn update(
        &self,
        id: &str,
        request: UpdateAssignmentRequest,
    ) -> Result<BallCollectorAssignment, DomainError> {
        info!(id = %id, "Updating ball collector assignment");

        let assignment_id =
            AssignmentId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let mut assignment = self
            .repository
            .get(&assignment_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Assignment '{}' not found", id)))?;

        let member_id = match request.member_id {
            Some(ref raw) if raw != assignment.member_id().as_str() => {
                self.require_member(raw).await?
            }
            _ => assignment.member_id().clone(),
        };
        let date = request
            .assignment_date
            .unwrap_or_else(|| assignment.assignment_date());

        if let Some(existing) = self.repository.find_for_member_on(&member_id, date).await? {
            if existing.id() != &assignment_id {
                return Err(DomainError::conflict(
                    "An assignment for this member on this date already exists",
                ));
            }
        }

        assignment.set_member_id(member_id);
        assignment.set_assignment_date(date);

        self.repository.update(assignment).await
    }

    /// Delete an assignment, returning true if it existed
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        info!(id = %id, "Deleting ball collector assignment");

        let assignment_id =
            AssignmentId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.delete(&assignment_id).await
    }

    /// Assignments within the week starting at the given day
    pub async fn week_from(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        let until = day
            .checked_add_days(Days::new(WEEK_WINDOW_DAYS))
            .ok_or_else(|| DomainError::internal("Date overflow computing week window"))?;

        let query = AssignmentQuery::new().with_from(day).with_until(until);
        self.repository.list(&query).await
    }

    /// Assignments for the current week (today inclusive)
    pub async fn current(&self) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        self.week_from(Utc::now().date_naive()).await
    }

    /// Assignments dated strictly after the given day, soonest first
    pub async fn after(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        let from = day
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DomainError::internal("Date overflow computing upcoming window"))?;

        let query = AssignmentQuery::new().with_from(from);
        self.repository.list(&query).await
    }

    /// All upcoming assignments
    pub async fn upcoming(&self) -> Result<Vec<BallCollectorAssignment>, DomainError> {
        self.after(Utc::now().date_naive()).await
    }

    /// Compose the reminder for the week starting at the given day,
    /// enriching each assignment with the member's name from the upstream.
    /// Members that can no longer be resolved are flagged, not dropped.
    pub async fn reminder_from(&self, day: NaiveDate) -> Result<ReminderSummary, DomainError> {
        let collectors = self.week_from(day).await?;

        if collectors.is_empty() {
            return Ok(ReminderSummary {
                message: "No ball collectors assigned for the current week. No reminders sent."
                    .to_string(),
                entries: Vec::new(),
            });
        }

        let mut entries = Vec::with_capacity(collectors.len());
        let mut details = Vec::with_capacity(collectors.len());

        for assignment in &collectors {
            match self.directory.find_member(assignment.member_id()).await {
                Ok(Some(summary)) => {
                    details.push(format!("{} (ID: {})", summary.name, assignment.member_id()));
                    entries.push(ReminderEntry {
                        member_id: assignment.member_id().clone(),
                        name: Some(summary.name),
                    });
                }
                Ok(None) => {
                    warn!(
                        assignment_id = %assignment.id(),
                        member_id = %assignment.member_id(),
                        "Assignment references a member that no longer exists"
                    );
                    details.push(format!("Unknown member (ID: {})", assignment.member_id()));
                    entries.push(ReminderEntry {
                        member_id: assignment.member_id().clone(),
                        name: None,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let message = format!(
            "Reminder! This week's ball collectors are: {}. Please ensure all responsibilities are met!",
            details.join(", ")
        );

        Ok(ReminderSummary { message, entries })
    }

    /// Compose the reminder for the current week
    pub async fn reminder(&self) -> Result<ReminderSummary, DomainError> {
        self.reminder_from(Utc::now().date_naive()).await
    }
}
