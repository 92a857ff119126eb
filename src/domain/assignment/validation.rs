//! Assignment field validation

use thiserror::Error;

/// Errors that can occur during assignment validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssignmentValidationError {
    #[error("Assignment ID must be a valid UUID")]
    InvalidId,
}

/// Validate an assignment ID (service-assigned UUIDs only)
pub fn validate_assignment_id(id: &str) -> Result<(), AssignmentValidationError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| AssignmentValidationError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_assignment_id() {
        assert!(validate_assignment_id("6fa459ea-ee8a-3ca4-894e-db77e160355e").is_ok());
    }

    #[test]
    fn test_invalid_assignment_id() {
        assert_eq!(
            validate_assignment_id("week-12"),
            Err(AssignmentValidationError::InvalidId)
        );
    }
}
