//! HTTP API layer for both services

pub mod collectors;
pub mod health;
pub mod members;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

pub use router::{collectors_router, members_router};
