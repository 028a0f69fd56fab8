use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::{AuthUser, Capability};
use crate::db;
use crate::error::AppError;
use crate::models::leave::STATUS_PENDING;
use crate::models::LeaveRequest;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct QueueParams {
    pub status: Option<String>,
    pub all: Option<bool>,
}

/// Manager review queue. Defaults to PENDING unless an explicit status
/// filter is given or `all=true`.
pub async fn manager_queue(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(params): Query<QueueParams>,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    auth.require(Capability::ManagerDashboard)?;

    let leaves = match params.status.as_deref() {
        Some(status) => db::leaves::list_by_status(&state.pool, status).await?,
        None if params.all == Some(true) => db::leaves::list_all(&state.pool).await?,
        None => db::leaves::list_by_status(&state.pool, STATUS_PENDING).await?,
    };
    Ok(Json(leaves))
}

pub async fn manager_stats(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<db::leaves::ManagerStats>, AppError> {
    auth.require(Capability::ManagerDashboard)?;
    let stats = db::leaves::manager_stats(&state.pool).await?;
    Ok(Json(stats))
}

pub async fn hr_summary(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaveRequest>>, AppError> {
    auth.require(Capability::HrDashboard)?;
    let leaves = db::leaves::list_all(&state.pool).await?;
    Ok(Json(leaves))
}

pub async fn employee_stats(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<db::leaves::EmployeeStats>, AppError> {
    let stats = db::leaves::employee_stats(&state.pool, auth.user_id).await?;
    Ok(Json(stats))
}
