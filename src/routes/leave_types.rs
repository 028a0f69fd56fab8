use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AuthUser, Capability};
use crate::db;
use crate::error::AppError;
use crate::models::LeaveType;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LeaveTypeRequest {
    pub name: String,
    pub days_allowed: i32,
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaveType>>, AppError> {
    let types = db::leave_types::list(&state.pool).await?;
    Ok(Json(types))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<LeaveTypeRequest>,
) -> Result<Json<LeaveType>, AppError> {
    auth.require(Capability::Administer)?;
    validate(&req)?;

    let leave_type = db::leave_types::create(&state.pool, &req.name, req.days_allowed).await?;
    Ok(Json(leave_type))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LeaveTypeRequest>,
) -> Result<Json<LeaveType>, AppError> {
    auth.require(Capability::Administer)?;
    validate(&req)?;

    let leave_type = db::leave_types::update(&state.pool, id, &req.name, req.days_allowed)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Leave type not found".to_string()),
            _ => AppError::Database(e),
        })?;
    Ok(Json(leave_type))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require(Capability::Administer)?;
    db::leave_types::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

fn validate(req: &LeaveTypeRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if req.days_allowed <= 0 {
        return Err(AppError::BadRequest(
            "days_allowed must be positive".to_string(),
        ));
    }
    Ok(())
}
