pub mod templates;

use std::sync::Arc;

use futures_util::future::join_all;
use sqlx::PgPool;

use crate::auth::Role;
use crate::db;
use crate::email::SystemMailer;
use crate::models::{LeaveRequest, LeaveType, User};

pub const KIND_EMAIL: &str = "EMAIL";

/// Best-effort message fan-out. Every method persists a notification row per
/// recipient and then attempts an email send; nothing here ever propagates an
/// error back into the workflow.
pub struct Notifier {
    mailer: Option<Arc<SystemMailer>>,
}

impl Notifier {
    pub fn new(mailer: Option<Arc<SystemMailer>>) -> Self {
        Self { mailer }
    }

    /// Notify the requester and every manager that a request was created.
    /// Manager sends are independent; one slow or failing send does not
    /// block the others.
    pub async fn leave_created(
        &self,
        pool: &PgPool,
        leave: &LeaveRequest,
        leave_type: &LeaveType,
        requester: &User,
    ) {
        let (subject, body) = templates::created_for_employee(requester, leave, leave_type);
        self.notify_one(pool, requester, &subject, &body).await;

        let managers = match db::users::list_by_role(pool, Role::Manager.as_str()).await {
            Ok(managers) => managers,
            Err(e) => {
                tracing::warn!("Failed to load managers for notification: {e}");
                return;
            }
        };

        let sends = managers.iter().map(|manager| async move {
            let (subject, body) =
                templates::created_for_manager(manager, requester, leave, leave_type);
            self.notify_one(pool, manager, &subject, &body).await;
        });
        join_all(sends).await;
    }

    /// Notify the requester alone that their request was decided.
    pub async fn leave_decided(
        &self,
        pool: &PgPool,
        leave: &LeaveRequest,
        leave_type: &LeaveType,
        requester: &User,
        decision_text: &str,
        decider: &User,
    ) {
        let (subject, body) =
            templates::decided_for_employee(requester, leave, leave_type, decision_text, decider);
        self.notify_one(pool, requester, &subject, &body).await;
    }

    async fn notify_one(&self, pool: &PgPool, user: &User, subject: &str, body: &str) {
        if let Err(e) = db::notifications::create(pool, user.id, KIND_EMAIL, subject, body).await {
            tracing::warn!("Failed to persist notification for {}: {e}", user.email);
        }

        if let Some(mailer) = &self.mailer {
            if let Err(e) = mailer.send(&user.email, subject, body).await {
                tracing::warn!("Failed to email {}: {e}", user.email);
            }
        }
    }
}
