//! Plain-text message bodies for workflow notifications.

use crate::models::{LeaveRequest, LeaveType, User};

pub fn created_for_employee(
    employee: &User,
    leave: &LeaveRequest,
    leave_type: &LeaveType,
) -> (String, String) {
    let subject = "Leave Request Submitted".to_string();
    let body = format!(
        "Hello {},\n\n\
         Your leave request has been successfully submitted.\n\n\
         Details:\n\
         - Leave Type: {}\n\
         - Start Date: {}\n\
         - End Date: {}\n\
         - Reason: {}\n\
         - Status: {}\n\n\
         You will be notified once your manager reviews your request.\n\n\
         Best regards,\n\
         Leaveflow",
        employee.name, leave_type.name, leave.start_date, leave.end_date, leave.reason, leave.status,
    );
    (subject, body)
}

pub fn created_for_manager(
    manager: &User,
    employee: &User,
    leave: &LeaveRequest,
    leave_type: &LeaveType,
) -> (String, String) {
    let subject = "New Leave Request Pending".to_string();
    let body = format!(
        "Hello {},\n\n\
         A new leave request has been submitted and requires your review.\n\n\
         Employee: {}\n\
         Leave Type: {}\n\
         Start Date: {}\n\
         End Date: {}\n\
         Reason: {}\n\n\
         Please log in to review and approve/reject this request.\n\n\
         Best regards,\n\
         Leaveflow",
        manager.name, employee.name, leave_type.name, leave.start_date, leave.end_date, leave.reason,
    );
    (subject, body)
}

pub fn decided_for_employee(
    employee: &User,
    leave: &LeaveRequest,
    leave_type: &LeaveType,
    decision_text: &str,
    decider: &User,
) -> (String, String) {
    let mut decided = decision_text.to_string();
    if let Some(first) = decided.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    let subject = format!("Leave Request {decided}");
    let body = format!(
        "Hello {},\n\n\
         Your leave request has been {} by {}.\n\n\
         Details:\n\
         - Leave Type: {}\n\
         - Start Date: {}\n\
         - End Date: {}\n\
         - Status: {}\n\
         - Manager Comment: {}\n\n\
         Best regards,\n\
         Leaveflow",
        employee.name,
        decision_text,
        decider.name,
        leave_type.name,
        leave.start_date,
        leave.end_date,
        leave.status,
        leave
            .manager_comment
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("No comment provided"),
    );
    (subject, body)
}
