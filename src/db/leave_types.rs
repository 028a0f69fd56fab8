use sqlx::PgPool;
use uuid::Uuid;

use crate::models::LeaveType;

pub async fn create(pool: &PgPool, name: &str, days_allowed: i32) -> Result<LeaveType, sqlx::Error> {
    sqlx::query_as::<_, LeaveType>(
        "INSERT INTO leave_types (name, days_allowed) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(days_allowed)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<LeaveType>, sqlx::Error> {
    sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<LeaveType>, sqlx::Error> {
    sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    days_allowed: i32,
) -> Result<LeaveType, sqlx::Error> {
    sqlx::query_as::<_, LeaveType>(
        "UPDATE leave_types SET name = $2, days_allowed = $3 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(days_allowed)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM leave_types WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
