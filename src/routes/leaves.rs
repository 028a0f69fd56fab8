use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AuthUser, Capability};
use crate::db;
use crate::error::AppError;
use crate::models::{AuditEntry, LeaveRequest};
use crate::state::SharedState;
use crate::workflow::{self, CreateLeave, Decision};

#[derive(Deserialize)]
pub struct CreateLeaveRequest {
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub comment: Option<String>,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<LeaveRequest>), AppError> {
    let leave = workflow::create_request(
        &state,
        &auth,
        CreateLeave {
            leave_type_id: req.leave_type_id,
            start_date: req.start_date,
            end_date: req.end_date,
            reason: req.reason,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(leave)))
}

pub async fn action(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<LeaveRequest>, AppError> {
    let decision = Decision::parse(&req.action)?;
    let leave = workflow::decide(&state, &auth, id, decision, req.comment).await?;
    Ok(Json(leave))
}

/// HR sees every request; everyone else only their own.
pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    let leaves = if auth.can(Capability::HrDashboard) {
        db::leaves::list_all(&state.pool).await?
    } else {
        db::leaves::list_for_user(&state.pool, auth.user_id).await?
    };
    Ok(Json(leaves))
}

/// Single-item retrieval: managers and HR can see any request, employees
/// only their own (a foreign id reads as not found).
pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeaveRequest>, AppError> {
    let leave = find_visible(&state, &auth, id).await?;
    Ok(Json(leave))
}

pub async fn audit_log(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AuditEntry>>, AppError> {
    let leave = find_visible(&state, &auth, id).await?;
    let entries = db::audit::list_for(&state.pool, leave.id).await?;
    Ok(Json(entries))
}

async fn find_visible(
    state: &SharedState,
    auth: &AuthUser,
    id: Uuid,
) -> Result<LeaveRequest, AppError> {
    let leave = if auth.can(Capability::ViewAnyLeave) {
        db::leaves::find_by_id(&state.pool, id).await?
    } else {
        db::leaves::find_by_id_for_user(&state.pool, id, auth.user_id).await?
    };
    leave.ok_or_else(|| AppError::NotFound("Leave request not found".to_string()))
}
