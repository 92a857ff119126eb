//! Team member entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_email, validate_member_id, validate_member_name, validate_phone,
    MemberValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Member identifier - a service-assigned UUID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(String);

impl MemberId {
    /// Create a MemberId from an existing string after validation
    pub fn new(id: impl Into<String>) -> Result<Self, MemberValidationError> {
        let id = id.into();
        validate_member_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random MemberId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MemberId {
    type Error = MemberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberId> for String {
    fn from(id: MemberId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for MemberId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Playing position of a team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Forward,
    Defender,
    Midfielder,
    Goalkeeper,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "Forward"),
            Self::Defender => write!(f, "Defender"),
            Self::Midfielder => write!(f, "Midfielder"),
            Self::Goalkeeper => write!(f, "Goalkeeper"),
        }
    }
}

/// Team member entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier
    id: MemberId,
    /// Display name
    name: String,
    /// Contact email, unique across the collection
    email: String,
    /// Contact phone, unique across the collection
    phone: String,
    /// Playing position
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    /// Date of birth
    date_of_birth: DateTime<Utc>,
    /// Date the member joined the team
    date_joined: DateTime<Utc>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl TeamMember {
    /// Create a new team member after validating all fields
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        date_joined: DateTime<Utc>,
    ) -> Result<Self, MemberValidationError> {
        let name = name.into();
        let email = email.into();
        let phone = phone.into();

        validate_member_name(&name)?;
        validate_email(&email)?;
        validate_phone(&phone)?;

        let now = Utc::now();

        Ok(Self {
            id,
            name,
            email,
            phone,
            position: None,
            date_of_birth,
            date_joined,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn date_of_birth(&self) -> DateTime<Utc> {
        self.date_of_birth
    }

    pub fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), MemberValidationError> {
        let name = name.into();
        validate_member_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), MemberValidationError> {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        self.touch();
        Ok(())
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<(), MemberValidationError> {
        let phone = phone.into();
        validate_phone(&phone)?;
        self.phone = phone;
        self.touch();
        Ok(())
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
        self.touch();
    }

    pub fn set_date_of_birth(&mut self, date_of_birth: DateTime<Utc>) {
        self.date_of_birth = date_of_birth;
        self.touch();
    }

    pub fn set_date_joined(&mut self, date_joined: DateTime<Utc>) {
        self.date_joined = date_joined;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl StorageEntity for TeamMember {
    type Key = MemberId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birthday() -> DateTime<Utc> {
        "1990-04-12T00:00:00Z".parse().unwrap()
    }

    fn joined() -> DateTime<Utc> {
        "2024-01-15T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_new_member() {
        let member = TeamMember::new(
            MemberId::generate(),
            "Alice Johnson",
            "alice@example.com",
            "+1 555 0100",
            birthday(),
            joined(),
        )
        .unwrap();

        assert_eq!(member.name(), "Alice Johnson");
        assert_eq!(member.email(), "alice@example.com");
        assert!(member.position().is_none());
    }

    #[test]
    fn test_new_member_rejects_bad_email() {
        let result = TeamMember::new(
            MemberId::generate(),
            "Alice Johnson",
            "not-an-email",
            "+1 555 0100",
            birthday(),
            joined(),
        );
        assert_eq!(result.unwrap_err(), MemberValidationError::InvalidEmail);
    }

    #[test]
    fn test_with_position() {
        let member = TeamMember::new(
            MemberId::generate(),
            "Bob Smith",
            "bob@example.com",
            "5550101",
            birthday(),
            joined(),
        )
        .unwrap()
        .with_position(Position::Defender);

        assert_eq!(member.position(), Some(Position::Defender));
    }

    #[test]
    fn test_setters_validate() {
        let mut member = TeamMember::new(
            MemberId::generate(),
            "Alice Johnson",
            "alice@example.com",
            "+1 555 0100",
            birthday(),
            joined(),
        )
        .unwrap();

        assert!(member.set_email("nope").is_err());
        assert_eq!(member.email(), "alice@example.com");

        member.set_email("alice.j@example.com").unwrap();
        assert_eq!(member.email(), "alice.j@example.com");
    }

    #[test]
    fn test_member_id_roundtrip() {
        let id = MemberId::generate();
        let serialized = serde_json::to_string(&id).unwrap();
        let parsed: MemberId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_member_id_rejects_garbage() {
        let result: Result<MemberId, _> = serde_json::from_str("\"not-a-uuid\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_position_serialization() {
        assert_eq!(
            serde_json::to_string(&Position::Goalkeeper).unwrap(),
            "\"Goalkeeper\""
        );
    }
}
