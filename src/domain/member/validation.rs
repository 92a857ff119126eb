//! Team member field validation

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during member validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MemberValidationError {
    #[error("Member ID must be a valid UUID")]
    InvalidId,

    #[error("Member name cannot be empty")]
    EmptyName,

    #[error("Member name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,
}

const MAX_MEMBER_NAME_LENGTH: usize = 100;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-()]{5,19}$").unwrap());

/// Validate a member ID (service-assigned UUIDs only)
pub fn validate_member_id(id: &str) -> Result<(), MemberValidationError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| MemberValidationError::InvalidId)
}

/// Validate a member display name
pub fn validate_member_name(name: &str) -> Result<(), MemberValidationError> {
    if name.trim().is_empty() {
        return Err(MemberValidationError::EmptyName);
    }

    if name.len() > MAX_MEMBER_NAME_LENGTH {
        return Err(MemberValidationError::NameTooLong(MAX_MEMBER_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), MemberValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(MemberValidationError::InvalidEmail)
    }
}

/// Validate a phone number
pub fn validate_phone(phone: &str) -> Result<(), MemberValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(MemberValidationError::InvalidPhone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_member_id() {
        assert!(validate_member_id("6fa459ea-ee8a-3ca4-894e-db77e160355e").is_ok());
    }

    #[test]
    fn test_invalid_member_id() {
        assert_eq!(
            validate_member_id("not-a-uuid"),
            Err(MemberValidationError::InvalidId)
        );
        assert_eq!(validate_member_id(""), Err(MemberValidationError::InvalidId));
    }

    #[test]
    fn test_valid_name() {
        assert!(validate_member_name("Alice Johnson").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            validate_member_name(""),
            Err(MemberValidationError::EmptyName)
        );
        assert_eq!(
            validate_member_name("   "),
            Err(MemberValidationError::EmptyName)
        );
    }

    #[test]
    fn test_name_too_long() {
        let name = "a".repeat(101);
        assert_eq!(
            validate_member_name(&name),
            Err(MemberValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("alice@example.com").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(MemberValidationError::InvalidEmail)
        );
        assert_eq!(validate_email(""), Err(MemberValidationError::InvalidEmail));
    }

    #[test]
    fn test_valid_phone() {
        assert!(validate_phone("+1 555 0100").is_ok());
        assert!(validate_phone("5550100").is_ok());
        assert!(validate_phone("+358 (0)40-123456").is_ok());
    }

    #[test]
    fn test_invalid_phone() {
        assert_eq!(validate_phone("abc"), Err(MemberValidationError::InvalidPhone));
        assert_eq!(validate_phone("12"), Err(MemberValidationError::InvalidPhone));
    }
}
