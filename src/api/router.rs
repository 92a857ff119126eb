//! Router assembly for both services

use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use super::middleware::logging_middleware;
use super::state::{CollectorsState, MembersState};
use super::{collectors, health, members};

/// Assemble the Team Members Service router
pub fn members_router(state: MembersState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(members::ready_check))
        .route("/live", get(health::live_check))
        // Member CRUD
        .route("/members", get(members::list_members))
        .route("/members", post(members::create_member))
        .route("/members/{member_id}", get(members::get_member))
        .route("/members/{member_id}", put(members::update_member))
        .route("/members/{member_id}", delete(members::delete_member))
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Assemble the Ball Collectors Service router
pub fn collectors_router(state: CollectorsState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(collectors::ready_check))
        .route("/live", get(health::live_check))
        // Assignment CRUD plus the week-window reads
        .route("/assignments", get(collectors::list_assignments))
        .route("/assignments", post(collectors::create_assignment))
        .route("/assignments/current", get(collectors::current_assignments))
        .route("/assignments/upcoming", get(collectors::upcoming_assignments))
        .route("/assignments/{assignment_id}", get(collectors::get_assignment))
        .route("/assignments/{assignment_id}", put(collectors::update_assignment))
        .route(
            "/assignments/{assignment_id}",
            delete(collectors::delete_assignment),
        )
        // Reminder composition
        .route("/reminders/send", post(collectors::send_reminders))
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
