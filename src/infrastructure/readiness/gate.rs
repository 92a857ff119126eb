//! Bounded-polling readiness gate
//!
//! The declarative "wait until healthy, give up after N tries" contract
//! the deployment layer used to provide, expressed in-process: poll a
//! probe on a fixed interval, transition `starting -> healthy` on the
//! first success, `starting -> failed` when the attempt budget runs out.
//! `failed` is terminal; the caller must not start dependents.

use tracing::{info, warn};

use crate::domain::readiness::{GatePolicy, HealthProbe, ReadinessError, ReadinessState};

/// Polls health probes until they pass or the attempt budget runs out
#[derive(Debug, Clone, Copy)]
pub struct HealthGate {
    policy: GatePolicy,
}

impl HealthGate {
    pub fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    /// Block until the probed dependency is healthy, or fail terminally.
    /// The first attempt happens immediately; the interval only separates
    /// attempts.
    pub async fn await_healthy(&self, probe: &dyn HealthProbe) -> Result<(), ReadinessError> {
        let mut state = ReadinessState::Starting;
        let mut last_error = String::new();

        info!(dependency = probe.name(), state = %state, "Waiting for dependency");

        for attempt in 1..=self.policy.max_attempts {
            match probe.check().await {
                Ok(()) => {
                    state = ReadinessState::Healthy;
                    info!(
                        dependency = probe.name(),
                        state = %state,
                        attempt,
                        "Dependency is healthy"
                    );
                    return Ok(());
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!(
                        dependency = probe.name(),
                        state = %state,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        error = %last_error,
                        "Dependency not healthy yet"
                    );
                }
            }

            if attempt < self.policy.max_attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        state = ReadinessState::Failed;
        warn!(dependency = probe.name(), state = %state, "Dependency never became healthy");

        Err(ReadinessError::DependencyFailed {
            name: probe.name().to_string(),
            attempts: self.policy.max_attempts,
            last_error,
        })
    }
}
