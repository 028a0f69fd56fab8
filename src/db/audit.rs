use sqlx::PgPool;
use uuid::Uuid;

use crate::models::AuditEntry;

/// Append one ledger entry. There is deliberately no update or delete here.
pub async fn append(
    pool: &PgPool,
    leave_id: Uuid,
    actor_id: Option<Uuid>,
    action: &str,
    previous_status: Option<&str>,
    new_status: &str,
    comment: Option<&str>,
) -> Result<AuditEntry, sqlx::Error> {
    sqlx::query_as::<_, AuditEntry>(
        "INSERT INTO leave_audit_log (leave_id, actor_id, action, previous_status, new_status, comment)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(leave_id)
    .bind(actor_id)
    .bind(action)
    .bind(previous_status)
    .bind(new_status)
    .bind(comment)
    .fetch_one(pool)
    .await
}

/// Ledger for one request, oldest first (insertion order).
pub async fn list_for(pool: &PgPool, leave_id: Uuid) -> Result<Vec<AuditEntry>, sqlx::Error> {
    sqlx::query_as::<_, AuditEntry>(
        "SELECT * FROM leave_audit_log WHERE leave_id = $1 ORDER BY id",
    )
    .bind(leave_id)
    .fetch_all(pool)
    .await
}
