//! Assignment infrastructure - repository and service implementations

mod repository;
mod service;

pub use repository::StorageAssignmentRepository;
pub use service::{
    AssignmentService, CreateAssignmentRequest, ReminderEntry, ReminderSummary,
    UpdateAssignmentRequest,
};
