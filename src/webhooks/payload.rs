use chrono::Utc;
use serde_json::{json, Value};

use crate::models::{LeaveRequest, LeaveType, User};

pub const EVENT_LEAVE_CREATED: &str = "leave_created";
pub const EVENT_LEAVE_APPROVED: &str = "leave_approved";
pub const EVENT_LEAVE_REJECTED: &str = "leave_rejected";

fn employee_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "name": user.name,
    })
}

pub fn leave_created(leave: &LeaveRequest, leave_type: &LeaveType, employee: &User) -> Value {
    json!({
        "event": EVENT_LEAVE_CREATED,
        "timestamp": Utc::now().to_rfc3339(),
        "data": {
            "leave_id": leave.id,
            "employee": employee_json(employee),
            "leave_type": leave_type.name,
            "start_date": leave.start_date.to_string(),
            "end_date": leave.end_date.to_string(),
            "reason": leave.reason,
            "status": leave.status,
            "created_at": leave.created_at.to_rfc3339(),
        }
    })
}

pub fn leave_decided(
    event_type: &str,
    leave: &LeaveRequest,
    leave_type: &LeaveType,
    employee: &User,
    decider: &User,
) -> Value {
    json!({
        "event": event_type,
        "timestamp": Utc::now().to_rfc3339(),
        "data": {
            "leave_id": leave.id,
            "employee": employee_json(employee),
            "leave_type": leave_type.name,
            "start_date": leave.start_date.to_string(),
            "end_date": leave.end_date.to_string(),
            "reason": leave.reason,
            "status": leave.status,
            "manager": {
                "id": decider.id,
                "name": decider.name,
            },
            "manager_comment": leave.manager_comment,
            "updated_at": leave.updated_at.to_rfc3339(),
        }
    })
}
