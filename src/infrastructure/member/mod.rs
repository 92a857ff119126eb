//! Member infrastructure - repository and service implementations

mod repository;
mod service;

pub use repository::StorageMemberRepository;
pub use service::{CreateMemberRequest, MemberService, UpdateMemberRequest};
