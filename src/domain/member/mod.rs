//! Team member domain module
//!
//! Members are the records the Team Members Service owns. The Ball
//! Collectors Service never writes this collection; it only reads members
//! through the service's HTTP API.

mod entity;
mod repository;
mod validation;

pub use entity::{MemberId, Position, TeamMember};
pub use repository::{MemberQuery, MemberRepository};
pub use validation::{
    validate_email, validate_member_id, validate_member_name, validate_phone,
    MemberValidationError,
};

#[cfg(test)]
pub use repository::mock;
