use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::LeaveRequest;

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    leave_type_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: &str,
) -> Result<LeaveRequest, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "INSERT INTO leave_requests (user_id, leave_type_id, start_date, end_date, reason)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(user_id)
    .bind(leave_type_id)
    .bind(start_date)
    .bind(end_date)
    .bind(reason)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lookup restricted to the requester's own rows.
pub async fn find_by_id_for_user(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "SELECT * FROM leave_requests WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "SELECT * FROM leave_requests WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "SELECT * FROM leave_requests WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

/// Atomic compare-and-set: the status update only applies while the request
/// is still PENDING, so two racing decisions cannot both win. Returns None
/// when the row was already decided (or never existed).
pub async fn transition_if_pending(
    pool: &PgPool,
    id: Uuid,
    new_status: &str,
    manager_comment: &str,
) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "UPDATE leave_requests
         SET status = $2, manager_comment = $3, updated_at = now()
         WHERE id = $1 AND status = 'PENDING'
         RETURNING *",
    )
    .bind(id)
    .bind(new_status)
    .bind(manager_comment)
    .fetch_optional(pool)
    .await
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ManagerStats {
    pub pending: i64,
    pub approved_today: i64,
    pub rejected_total: i64,
}

pub async fn manager_stats(pool: &PgPool) -> Result<ManagerStats, sqlx::Error> {
    sqlx::query_as::<_, ManagerStats>(
        "SELECT
             COUNT(*) FILTER (WHERE status = 'PENDING') AS pending,
             COUNT(*) FILTER (WHERE status = 'APPROVED' AND updated_at::date = CURRENT_DATE) AS approved_today,
             COUNT(*) FILTER (WHERE status = 'REJECTED') AS rejected_total
         FROM leave_requests",
    )
    .fetch_one(pool)
    .await
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct EmployeeStats {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

pub async fn employee_stats(pool: &PgPool, user_id: Uuid) -> Result<EmployeeStats, sqlx::Error> {
    sqlx::query_as::<_, EmployeeStats>(
        "SELECT
             COUNT(*) FILTER (WHERE status = 'PENDING') AS pending,
             COUNT(*) FILTER (WHERE status = 'APPROVED') AS approved,
             COUNT(*) FILTER (WHERE status = 'REJECTED') AS rejected
         FROM leave_requests WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
