//! The leave-request state machine.
//!
//! Both entry points follow the same side-effect order: persist the
//! transition, append the audit entry, then fire notifications and webhooks.
//! The last two are best-effort and can never fail or roll back the
//! transition itself.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::{AuthUser, Capability};
use crate::db;
use crate::error::AppError;
use crate::models::leave::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};
use crate::models::{LeaveRequest, User};
use crate::state::AppState;
use crate::webhooks::payload::{self, EVENT_LEAVE_APPROVED, EVENT_LEAVE_REJECTED};

pub const ACTION_CREATED: &str = "CREATED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Parse the decision token from the API. Anything other than
    /// "approve" or "reject" is a validation error.
    pub fn parse(token: &str) -> Result<Decision, AppError> {
        match token {
            "approve" => Ok(Decision::Approve),
            "reject" => Ok(Decision::Reject),
            _ => Err(AppError::BadRequest("Invalid action".to_string())),
        }
    }

    pub fn new_status(&self) -> &'static str {
        match self {
            Decision::Approve => STATUS_APPROVED,
            Decision::Reject => STATUS_REJECTED,
        }
    }

    pub fn audit_action(&self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::Reject => "REJECT",
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Decision::Approve => EVENT_LEAVE_APPROVED,
            Decision::Reject => EVENT_LEAVE_REJECTED,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        }
    }
}

#[derive(Debug)]
pub struct CreateLeave {
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// Submit a new leave request for the authenticated user. The request starts
/// PENDING; side effects run in order: audit entry, notifications (requester
/// plus all managers), `leave_created` webhook.
pub async fn create_request(
    state: &AppState,
    actor: &AuthUser,
    input: CreateLeave,
) -> Result<LeaveRequest, AppError> {
    let leave_type = db::leave_types::find_by_id(&state.pool, input.leave_type_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Unknown leave type".to_string()))?;

    if input.reason.trim().is_empty() {
        return Err(AppError::BadRequest("Reason is required".to_string()));
    }

    let requester = db::users::find_by_id(&state.pool, actor.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

    let leave = db::leaves::create(
        &state.pool,
        requester.id,
        leave_type.id,
        input.start_date,
        input.end_date,
        &input.reason,
    )
    .await?;

    db::audit::append(
        &state.pool,
        leave.id,
        Some(requester.id),
        ACTION_CREATED,
        None,
        STATUS_PENDING,
        Some("Leave request created"),
    )
    .await?;

    state
        .notifier
        .leave_created(&state.pool, &leave, &leave_type, &requester)
        .await;

    let event = payload::leave_created(&leave, &leave_type, &requester);
    state
        .dispatcher
        .dispatch(&state.pool, payload::EVENT_LEAVE_CREATED, &event)
        .await;

    Ok(leave)
}

/// Approve or reject a pending request. Only managers and HR may decide.
/// The status change is an atomic compare-and-set: a request that already
/// left PENDING (including via a racing decision) yields 409.
pub async fn decide(
    state: &AppState,
    actor: &AuthUser,
    leave_id: Uuid,
    decision: Decision,
    comment: Option<String>,
) -> Result<LeaveRequest, AppError> {
    actor.require(Capability::DecideLeave)?;

    let existing = db::leaves::find_by_id(&state.pool, leave_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Leave request not found".to_string()))?;
    let previous_status = existing.status;

    let comment = comment.unwrap_or_default();
    let leave = db::leaves::transition_if_pending(
        &state.pool,
        leave_id,
        decision.new_status(),
        &comment,
    )
    .await?
    .ok_or_else(|| AppError::Conflict("Leave request has already been decided".to_string()))?;

    db::audit::append(
        &state.pool,
        leave.id,
        Some(actor.user_id),
        decision.audit_action(),
        Some(&previous_status),
        decision.new_status(),
        (!comment.is_empty()).then_some(comment.as_str()),
    )
    .await?;

    // The transition is committed; lookups for the side-effect payloads are
    // best-effort from here on.
    let requester = find_user(state, leave.user_id).await;
    let decider = find_user(state, actor.user_id).await;
    let leave_type = db::leave_types::find_by_id(&state.pool, leave.leave_type_id)
        .await
        .ok()
        .flatten();

    match (requester, decider, leave_type) {
        (Some(requester), Some(decider), Some(leave_type)) => {
            state
                .notifier
                .leave_decided(
                    &state.pool,
                    &leave,
                    &leave_type,
                    &requester,
                    decision.past_tense(),
                    &decider,
                )
                .await;

            let event = payload::leave_decided(
                decision.event_type(),
                &leave,
                &leave_type,
                &requester,
                &decider,
            );
            state
                .dispatcher
                .dispatch(&state.pool, decision.event_type(), &event)
                .await;
        }
        _ => {
            tracing::warn!(
                "Skipping side effects for leave {}: requester, decider, or leave type missing",
                leave.id
            );
        }
    }

    Ok(leave)
}

async fn find_user(state: &AppState, id: Uuid) -> Option<User> {
    db::users::find_by_id(&state.pool, id).await.ok().flatten()
}
