//! Ball Collectors Service endpoints

use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::health::{component_check, readiness_response};
use crate::api::state::CollectorsState;
use crate::api::types::{ApiError, Json};
use crate::domain::assignment::{AssignmentQuery, BallCollectorAssignment};
use crate::domain::member::MemberId;
use crate::infrastructure::assignment::{
    CreateAssignmentRequest, ReminderSummary, UpdateAssignmentRequest,
};

/// Request to create a new assignment
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentApiRequest {
    pub member_id: String,
    pub assignment_date: NaiveDate,
}

/// Request to update an assignment; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateAssignmentApiRequest {
    pub member_id: Option<String>,
    pub assignment_date: Option<NaiveDate>,
}

/// Assignment response
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResponse {
    pub id: String,
    pub member_id: String,
    pub assignment_date: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&BallCollectorAssignment> for AssignmentResponse {
    fn from(assignment: &BallCollectorAssignment) -> Self {
        Self {
            id: assignment.id().as_str().to_string(),
            member_id: assignment.member_id().as_str().to_string(),
            assignment_date: assignment.assignment_date(),
            created_at: assignment.created_at().to_rfc3339(),
            updated_at: assignment.updated_at().to_rfc3339(),
        }
    }
}

/// List assignments response
#[derive(Debug, Clone, Serialize)]
pub struct ListAssignmentsResponse {
    pub assignments: Vec<AssignmentResponse>,
    pub total: usize,
}

impl ListAssignmentsResponse {
    fn from_assignments(assignments: &[BallCollectorAssignment]) -> Self {
        let assignments: Vec<AssignmentResponse> =
            assignments.iter().map(AssignmentResponse::from).collect();
        let total = assignments.len();

        Self { assignments, total }
    }
}

/// One collector in a reminder response
#[derive(Debug, Clone, Serialize)]
pub struct ReminderCollectorResponse {
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Reminder response
#[derive(Debug, Clone, Serialize)]
pub struct ReminderResponse {
    pub message: String,
    pub collectors: Vec<ReminderCollectorResponse>,
}

impl From<ReminderSummary> for ReminderResponse {
    fn from(summary: ReminderSummary) -> Self {
        Self {
            message: summary.message,
            collectors: summary
                .entries
                .into_iter()
                .map(|entry| ReminderCollectorResponse {
                    member_id: entry.member_id.as_str().to_string(),
                    name: entry.name,
                })
                .collect(),
        }
    }
}

/// Query parameters accepted by GET /assignments
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListAssignmentsParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub member_id: Option<String>,
}

/// GET /assignments
pub async fn list_assignments(
    State(state): State<CollectorsState>,
    Query(params): Query<ListAssignmentsParams>,
) -> Result<Json<ListAssignmentsResponse>, ApiError> {
    debug!("Listing ball collector assignments");

    let mut query = AssignmentQuery::new();

    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }

    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    if let Some(ref member_id) = params.member_id {
        let member_id = MemberId::new(member_id)
            .map_err(|e| ApiError::bad_request(e.to_string()).with_param("member_id"))?;
        query = query.with_member(member_id);
    }

    let assignments = state
        .assignment_service
        .list(Some(query))
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListAssignmentsResponse::from_assignments(&assignments)))
}

/// POST /assignments
pub async fn create_assignment(
    State(state): State<CollectorsState>,
    Json(request): Json<CreateAssignmentApiRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ApiError> {
    debug!(
        member_id = %request.member_id,
        date = %request.assignment_date,
        "Creating ball collector assignment"
    );

    let service_request = CreateAssignmentRequest {
        member_id: request.member_id,
        assignment_date: request.assignment_date,
    };

    let assignment = state
        .assignment_service
        .create(service_request)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(AssignmentResponse::from(&assignment)),
    ))
}

/// GET /assignments/current
pub async fn current_assignments(
    State(state): State<CollectorsState>,
) -> Result<Json<ListAssignmentsResponse>, ApiError> {
    debug!("Listing current week's ball collectors");

    let assignments = state
        .assignment_service
        .current()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListAssignmentsResponse::from_assignments(&assignments)))
}

/// GET /assignments/upcoming
pub async fn upcoming_assignments(
    State(state): State<CollectorsState>,
) -> Result<Json<ListAssignmentsResponse>, ApiError> {
    debug!("Listing upcoming ball collector assignments");

    let assignments = state
        .assignment_service
        .upcoming()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListAssignmentsResponse::from_assignments(&assignments)))
}

/// GET /assignments/{assignment_id}
pub async fn get_assignment(
    State(state): State<CollectorsState>,
    Path(assignment_id): Path<String>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    debug!(assignment_id = %assignment_id, "Getting assignment");

    let assignment = state
        .assignment_service
        .get(&assignment_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            ApiError::not_found(format!("Assignment '{}' not found", assignment_id))
        })?;

    Ok(Json(AssignmentResponse::from(&assignment)))
}

/// PUT /assignments/{assignment_id}
pub async fn update_assignment(
    State(state): State<CollectorsState>,
    Path(assignment_id): Path<String>,
    Json(request): Json<UpdateAssignmentApiRequest>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    debug!(assignment_id = %assignment_id, "Updating assignment");

    let service_request = UpdateAssignmentRequest {
        member_id: request.member_id,
        assignment_date: request.assignment_date,
    };

    let assignment = state
        .assignment_service
        .update(&assignment_id, service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AssignmentResponse::from(&assignment)))
}

/// DELETE /assignments/{assignment_id}
pub async fn delete_assignment(
    State(state): State<CollectorsState>,
    Path(assignment_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(assignment_id = %assignment_id, "Deleting assignment");

    let deleted = state
        .assignment_service
        .delete(&assignment_id)
        .await
        .map_err(ApiError::from)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Assignment '{}' not found",
            assignment_id
        )))
    }
}

/// POST /reminders/send
pub async fn send_reminders(
    State(state): State<CollectorsState>,
) -> Result<Json<ReminderResponse>, ApiError> {
    debug!("Composing ball collector reminders");

    let summary = state
        .assignment_service
        .reminder()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ReminderResponse::from(summary)))
}

/// GET /ready - verifies the datastore and the upstream members service
pub async fn ready_check(State(state): State<CollectorsState>) -> impl IntoResponse {
    let start = Instant::now();

    let check_start = Instant::now();
    let datastore = state
        .assignment_service
        .list(Some(AssignmentQuery::new().with_limit(1)))
        .await
        .map(|_| ());
    let datastore_check = component_check("datastore", datastore, check_start);

    let check_start = Instant::now();
    let upstream = state.directory.ping().await;
    let upstream_check = component_check("team_members", upstream, check_start);

    readiness_response(vec![datastore_check, upstream_check], start)
}
