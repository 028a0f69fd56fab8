use sqlx::PgPool;
use uuid::Uuid;

use crate::models::WebhookDelivery;

/// Insert the delivery row before the network attempt so a record exists even
/// if the process dies mid-call. Starts with success = FALSE.
pub async fn create_attempt(
    pool: &PgPool,
    webhook_id: Uuid,
    event_type: &str,
    payload: &serde_json::Value,
) -> Result<WebhookDelivery, sqlx::Error> {
    sqlx::query_as::<_, WebhookDelivery>(
        "INSERT INTO webhook_deliveries (webhook_id, event_type, payload)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(webhook_id)
    .bind(event_type)
    .bind(payload)
    .fetch_one(pool)
    .await
}

pub async fn record_response(
    pool: &PgPool,
    id: Uuid,
    response_status: i32,
    response_body: &str,
    success: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE webhook_deliveries
         SET response_status = $2, response_body = $3, success = $4
         WHERE id = $1",
    )
    .bind(id)
    .bind(response_status)
    .bind(response_body)
    .bind(success)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn record_failure(pool: &PgPool, id: Uuid, error_message: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE webhook_deliveries SET success = FALSE, error_message = $2 WHERE id = $1",
    )
    .bind(id)
    .bind(error_message)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_for_webhook(
    pool: &PgPool,
    webhook_id: Uuid,
) -> Result<Vec<WebhookDelivery>, sqlx::Error> {
    sqlx::query_as::<_, WebhookDelivery>(
        "SELECT * FROM webhook_deliveries WHERE webhook_id = $1 ORDER BY delivered_at DESC",
    )
    .bind(webhook_id)
    .fetch_all(pool)
    .await
}

pub async fn list_for_event(
    pool: &PgPool,
    event_type: &str,
) -> Result<Vec<WebhookDelivery>, sqlx::Error> {
    sqlx::query_as::<_, WebhookDelivery>(
        "SELECT * FROM webhook_deliveries WHERE event_type = $1 ORDER BY delivered_at DESC",
    )
    .bind(event_type)
    .fetch_all(pool)
    .await
}
