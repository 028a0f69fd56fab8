use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{AuthUser, Capability};
use crate::db;
use crate::error::AppError;
use crate::models::{Webhook, WebhookDelivery};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateWebhook {
    pub name: String,
    pub target_url: String,
    pub events: Vec<String>,
    pub secret: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateWebhook {
    pub name: String,
    pub target_url: String,
    pub events: Vec<String>,
    pub is_active: bool,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Webhook>>, AppError> {
    auth.require(Capability::Administer)?;
    let webhooks = db::webhooks::list(&state.pool).await?;
    Ok(Json(webhooks))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateWebhook>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require(Capability::Administer)?;
    validate_target(&req.name, &req.target_url)?;

    // The signing secret is shown once, at creation.
    let secret = req.secret.unwrap_or_else(generate_secret);
    let webhook =
        db::webhooks::create(&state.pool, &req.name, &req.target_url, &secret, &req.events)
            .await?;

    Ok(Json(json!({ "webhook": webhook, "secret": secret })))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Webhook>, AppError> {
    auth.require(Capability::Administer)?;
    let webhook = db::webhooks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;
    Ok(Json(webhook))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateWebhook>,
) -> Result<Json<Webhook>, AppError> {
    auth.require(Capability::Administer)?;
    validate_target(&req.name, &req.target_url)?;

    let webhook = db::webhooks::update(
        &state.pool,
        id,
        &req.name,
        &req.target_url,
        &req.events,
        req.is_active,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Webhook not found".to_string()),
        _ => AppError::Database(e),
    })?;
    Ok(Json(webhook))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require(Capability::Administer)?;
    db::webhooks::delete(&state.pool, id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

pub async fn deliveries(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<WebhookDelivery>>, AppError> {
    auth.require(Capability::Administer)?;
    db::webhooks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Webhook not found".to_string()))?;

    let deliveries = db::deliveries::list_for_webhook(&state.pool, id).await?;
    Ok(Json(deliveries))
}

fn generate_secret() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn validate_target(name: &str, target_url: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if !target_url.starts_with("http://") && !target_url.starts_with("https://") {
        return Err(AppError::BadRequest(
            "target_url must be an http(s) URL".to_string(),
        ));
    }
    Ok(())
}
