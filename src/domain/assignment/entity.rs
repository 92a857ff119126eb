//! Ball collector assignment entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_assignment_id, AssignmentValidationError};
use crate::domain::member::MemberId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Assignment identifier - a service-assigned UUID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssignmentId(String);

impl AssignmentId {
    /// Create an AssignmentId from an existing string after validation
    pub fn new(id: impl Into<String>) -> Result<Self, AssignmentValidationError> {
        let id = id.into();
        validate_assignment_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random AssignmentId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AssignmentId {
    type Error = AssignmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssignmentId> for String {
    fn from(id: AssignmentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for AssignmentId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A ball carrier assignment: one member is responsible on one date.
///
/// The member reference points into the Team Members Service's collection;
/// the datastore does not enforce it, so the service validates it against
/// the upstream at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallCollectorAssignment {
    /// Unique identifier
    id: AssignmentId,
    /// Assigned team member
    member_id: MemberId,
    /// Date the assignment is valid for (start of the week by convention)
    assignment_date: NaiveDate,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl BallCollectorAssignment {
    pub fn new(id: AssignmentId, member_id: MemberId, assignment_date: NaiveDate) -> Self {
        let now = Utc::now();

        Self {
            id,
            member_id,
            assignment_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &AssignmentId {
        &self.id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn assignment_date(&self) -> NaiveDate {
        self.assignment_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_member_id(&mut self, member_id: MemberId) {
        self.member_id = member_id;
        self.touch();
    }

    pub fn set_assignment_date(&mut self, assignment_date: NaiveDate) {
        self.assignment_date = assignment_date;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for BallCollectorAssignment {
    type Key = AssignmentId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assignment() {
        let member_id = MemberId::generate();
        let date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let assignment =
            BallCollectorAssignment::new(AssignmentId::generate(), member_id.clone(), date);

        assert_eq!(assignment.member_id(), &member_id);
        assert_eq!(assignment.assignment_date(), date);
    }

    #[test]
    fn test_assignment_roundtrip() {
        let assignment = BallCollectorAssignment::new(
            AssignmentId::generate(),
            MemberId::generate(),
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
        );

        let json = serde_json::to_string(&assignment).unwrap();
        let parsed: BallCollectorAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id(), assignment.id());
        assert_eq!(parsed.assignment_date(), assignment.assignment_date());
    }

    #[test]
    fn test_assignment_id_rejects_garbage() {
        let result: Result<AssignmentId, _> = serde_json::from_str("\"week-12\"");
        assert!(result.is_err());
    }
}
