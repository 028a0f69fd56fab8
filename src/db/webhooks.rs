use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Webhook;

pub async fn create(
    pool: &PgPool,
    name: &str,
    target_url: &str,
    secret: &str,
    events: &[String],
) -> Result<Webhook, sqlx::Error> {
    sqlx::query_as::<_, Webhook>(
        "INSERT INTO webhooks (name, target_url, secret, events)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(target_url)
    .bind(secret)
    .bind(Json(events))
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Webhook>, sqlx::Error> {
    sqlx::query_as::<_, Webhook>("SELECT * FROM webhooks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Webhook>, sqlx::Error> {
    sqlx::query_as::<_, Webhook>("SELECT * FROM webhooks ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<Webhook>, sqlx::Error> {
    sqlx::query_as::<_, Webhook>("SELECT * FROM webhooks WHERE is_active = TRUE")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    target_url: &str,
    events: &[String],
    is_active: bool,
) -> Result<Webhook, sqlx::Error> {
    sqlx::query_as::<_, Webhook>(
        "UPDATE webhooks SET name = $2, target_url = $3, events = $4, is_active = $5
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(target_url)
    .bind(Json(events))
    .bind(is_active)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM webhooks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
