//! Readiness infrastructure - the startup health gate and its probes

mod gate;
mod probes;

pub use gate::HealthGate;
pub use probes::{HttpServiceProbe, MongoPingProbe};
