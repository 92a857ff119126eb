//! Team Members Service endpoints

use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::health::{component_check, readiness_response};
use crate::api::state::MembersState;
use crate::api::types::{ApiError, Json};
use crate::domain::member::{MemberQuery, Position, TeamMember};
use crate::infrastructure::member::{CreateMemberRequest, UpdateMemberRequest};

/// Default cap on list results
const DEFAULT_LIST_LIMIT: usize = 100;

/// Request to create a new member
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberApiRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub position: Option<Position>,
    pub date_of_birth: DateTime<Utc>,
    pub date_joined: DateTime<Utc>,
}

/// Request to update a member; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateMemberApiRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<Position>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub date_joined: Option<DateTime<Utc>>,
}

/// Member response
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub date_of_birth: String,
    pub date_joined: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&TeamMember> for MemberResponse {
    fn from(member: &TeamMember) -> Self {
        Self {
            id: member.id().as_str().to_string(),
            name: member.name().to_string(),
            email: member.email().to_string(),
            phone: member.phone().to_string(),
            position: member.position(),
            date_of_birth: member.date_of_birth().to_rfc3339(),
            date_joined: member.date_joined().to_rfc3339(),
            created_at: member.created_at().to_rfc3339(),
            updated_at: member.updated_at().to_rfc3339(),
        }
    }
}

/// List members response
#[derive(Debug, Clone, Serialize)]
pub struct ListMembersResponse {
    pub members: Vec<MemberResponse>,
    pub total: usize,
}

/// Query parameters accepted by GET /members
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListMembersParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub position: Option<Position>,
}

/// GET /members
pub async fn list_members(
    State(state): State<MembersState>,
    Query(params): Query<ListMembersParams>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    debug!("Listing team members");

    let mut query = MemberQuery::new().with_limit(params.limit.unwrap_or(DEFAULT_LIST_LIMIT));

    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    if let Some(position) = params.position {
        query = query.with_position(position);
    }

    let members = state
        .member_service
        .list(Some(query))
        .await
        .map_err(ApiError::from)?;

    let member_responses: Vec<MemberResponse> = members.iter().map(MemberResponse::from).collect();
    let total = member_responses.len();

    Ok(Json(ListMembersResponse {
        members: member_responses,
        total,
    }))
}

/// POST /members
pub async fn create_member(
    State(state): State<MembersState>,
    Json(request): Json<CreateMemberApiRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    debug!(name = %request.name, "Creating team member");

    let service_request = CreateMemberRequest {
        name: request.name,
        email: request.email,
        phone: request.phone,
        position: request.position,
        date_of_birth: request.date_of_birth,
        date_joined: request.date_joined,
    };

    let member = state
        .member_service
        .create(service_request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(&member))))
}

/// GET /members/{member_id}
pub async fn get_member(
    State(state): State<MembersState>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberResponse>, ApiError> {
    debug!(member_id = %member_id, "Getting team member");

    let member = state
        .member_service
        .get(&member_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Team member '{}' not found", member_id)))?;

    Ok(Json(MemberResponse::from(&member)))
}

/// PUT /members/{member_id}
pub async fn update_member(
    State(state): State<MembersState>,
    Path(member_id): Path<String>,
    Json(request): Json<UpdateMemberApiRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    debug!(member_id = %member_id, "Updating team member");

    let service_request = UpdateMemberRequest {
        name: request.name,
        email: request.email,
        phone: request.phone,
        position: request.position,
        date_of_birth: request.date_of_birth,
        date_joined: request.date_joined,
    };

    let member = state
        .member_service
        .update(&member_id, service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(MemberResponse::from(&member)))
}

/// DELETE /members/{member_id}
pub async fn delete_member(
    State(state): State<MembersState>,
    Path(member_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(member_id = %member_id, "Deleting team member");

    let deleted = state
        .member_service
        .delete(&member_id)
        .await
        .map_err(ApiError::from)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Team member '{}' not found",
            member_id
        )))
    }
}

/// GET /ready - verifies the datastore by exercising the member store
pub async fn ready_check(State(state): State<MembersState>) -> impl IntoResponse {
    let start = Instant::now();

    let check_start = Instant::now();
    let result = state
        .member_service
        .list(Some(MemberQuery::new().with_limit(1)))
        .await
        .map(|_| ());

    let checks = vec![component_check("datastore", result, check_start)];
    readiness_response(checks, start)
}
