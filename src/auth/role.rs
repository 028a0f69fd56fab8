use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Manager,
    Hr,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Manager => "MANAGER",
            Role::Hr => "HR",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "EMPLOYEE" => Some(Role::Employee),
            "MANAGER" => Some(Role::Manager),
            "HR" => Some(Role::Hr),
            _ => None,
        }
    }
}

/// Everything a role gate in the API can ask for. Keeping the mapping in one
/// place instead of ad-hoc `role == X` checks per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Approve or reject a leave request.
    DecideLeave,
    /// Read any leave request, not just one's own.
    ViewAnyLeave,
    /// Manager dashboard: pending queue and stats.
    ManagerDashboard,
    /// HR dashboard: full summary.
    HrDashboard,
    /// Manage leave types and webhook subscriptions.
    Administer,
}

impl Capability {
    pub fn granted_to(&self, role: Role) -> bool {
        match self {
            Capability::DecideLeave => matches!(role, Role::Manager | Role::Hr),
            Capability::ViewAnyLeave => matches!(role, Role::Manager | Role::Hr),
            Capability::ManagerDashboard => role == Role::Manager,
            Capability::HrDashboard => role == Role::Hr,
            Capability::Administer => role == Role::Hr,
        }
    }
}
