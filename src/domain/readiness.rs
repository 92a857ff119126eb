//! Readiness state machine types
//!
//! Startup sequencing is driven by gating on dependencies: a dependency is
//! `Starting` until its probe first succeeds (`Healthy`), or until the
//! bounded attempt budget is exhausted (`Failed`, terminal - dependents are
//! never started).

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::DomainError;

/// Lifecycle state of a gated dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    /// Probing has begun but has not yet succeeded
    Starting,
    /// The probe succeeded at least once
    Healthy,
    /// The attempt budget ran out without a success
    Failed,
}

impl std::fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Starting => write!(f, "starting"),
            Self::Healthy => write!(f, "healthy"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A point-in-time health question about one component
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Name of the probed component, used in logs and errors
    fn name(&self) -> &str;

    /// Check the component once
    async fn check(&self) -> Result<(), DomainError>;
}

/// Polling policy for a readiness gate
#[derive(Debug, Clone, Copy)]
pub struct GatePolicy {
    /// Delay between attempts
    pub interval: Duration,
    /// Total attempts before the gate gives up
    pub max_attempts: u32,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

/// Errors produced by a readiness gate
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReadinessError {
    #[error("Dependency '{name}' never became healthy after {attempts} attempts: {last_error}")]
    DependencyFailed {
        name: String,
        attempts: u32,
        last_error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(ReadinessState::Starting.to_string(), "starting");
        assert_eq!(ReadinessState::Healthy.to_string(), "healthy");
        assert_eq!(ReadinessState::Failed.to_string(), "failed");
    }

    #[test]
    fn test_default_policy() {
        let policy = GatePolicy::default();
        assert_eq!(policy.max_attempts, 30);
        assert_eq!(policy.interval, Duration::from_secs(2));
    }
}
