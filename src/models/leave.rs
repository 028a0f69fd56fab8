use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_APPROVED: &str = "APPROVED";
pub const STATUS_REJECTED: &str = "REJECTED";

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct LeaveType {
    pub id: Uuid,
    pub name: String,
    pub days_allowed: i32,
    pub created_at: DateTime<Utc>,
}

/// A leave application. `status` is the state machine:
/// PENDING at creation, then exactly one transition to APPROVED or REJECTED.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: String,
    pub manager_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
