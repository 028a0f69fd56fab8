use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Webhook {
    pub id: Uuid,
    pub name: String,
    pub target_url: String,
    #[serde(skip_serializing)]
    pub secret: String,
    pub events: Json<Vec<String>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Webhook {
    /// Membership test on the subscribed event set, done in memory.
    pub fn subscribes_to(&self, event_type: &str) -> bool {
        self.events.iter().any(|e| e == event_type)
    }
}

/// One attempted transmission of an event to one webhook. Created before the
/// network call, updated with the outcome afterwards.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct WebhookDelivery {
    pub id: Uuid,
    pub webhook_id: Uuid,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub response_status: Option<i32>,
    pub response_body: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
    pub delivered_at: DateTime<Utc>,
}
