pub mod auth;
pub mod leave_types;
pub mod leaves;
pub mod notifications;
pub mod stats;
pub mod webhooks;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        // Leave workflow
        .route("/api/v1/leaves", get(leaves::list).post(leaves::create))
        .route("/api/v1/leaves/{id}", get(leaves::get))
        .route("/api/v1/leaves/{id}/action", post(leaves::action))
        .route("/api/v1/leaves/{id}/audit", get(leaves::audit_log))
        // Dashboards
        .route("/api/v1/manager-queue", get(stats::manager_queue))
        .route("/api/v1/manager-stats", get(stats::manager_stats))
        .route("/api/v1/hr-summary", get(stats::hr_summary))
        .route("/api/v1/employee-stats", get(stats::employee_stats))
        // Leave types
        .route(
            "/api/v1/leave-types",
            get(leave_types::list).post(leave_types::create),
        )
        .route(
            "/api/v1/leave-types/{id}",
            put(leave_types::update).delete(leave_types::delete),
        )
        // Webhook administration
        .route(
            "/api/v1/webhooks",
            get(webhooks::list).post(webhooks::create),
        )
        .route(
            "/api/v1/webhooks/{id}",
            get(webhooks::get)
                .put(webhooks::update)
                .delete(webhooks::delete),
        )
        .route("/api/v1/webhooks/{id}/deliveries", get(webhooks::deliveries))
        // Notifications
        .route("/api/v1/notifications", get(notifications::list))
        .route(
            "/api/v1/notifications/{id}/read",
            post(notifications::mark_read),
        )
}
