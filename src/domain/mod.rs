//! Domain layer: entities, validation, repository traits and shared errors

pub mod assignment;
pub mod directory;
pub mod error;
pub mod member;
pub mod readiness;
pub mod storage;

pub use assignment::{AssignmentId, AssignmentQuery, BallCollectorAssignment};
pub use directory::{MemberDirectory, MemberSummary};
pub use error::DomainError;
pub use member::{MemberId, MemberQuery, Position, TeamMember};
pub use readiness::{GatePolicy, HealthProbe, ReadinessError, ReadinessState};
