pub mod payload;
pub mod signature;

use std::time::Duration;

use futures_util::future::join_all;
use sqlx::PgPool;

use crate::db;
use crate::models::Webhook;

pub const USER_AGENT: &str = "LeaveFlow-Webhook/1.0";

pub struct WebhookDispatcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl WebhookDispatcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .build()
                .expect("Failed to build reqwest client"),
            timeout,
        }
    }

    /// Fan one event out to every active webhook subscribed to it. Deliveries
    /// run concurrently and independently; outcomes land in the
    /// webhook_deliveries table, never in the caller's result.
    pub async fn dispatch(&self, pool: &PgPool, event_type: &str, payload: &serde_json::Value) {
        let webhooks = match db::webhooks::list_active(pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to load webhooks for {event_type}: {e}");
                return;
            }
        };

        let attempts = webhooks
            .into_iter()
            .filter(|w| w.subscribes_to(event_type))
            .map(|webhook| self.deliver(pool, webhook, event_type, payload));

        join_all(attempts).await;
    }

    /// One attempt against one webhook. The delivery row is written before
    /// the network call so a record exists even if the call never completes.
    async fn deliver(
        &self,
        pool: &PgPool,
        webhook: Webhook,
        event_type: &str,
        payload: &serde_json::Value,
    ) {
        let delivery =
            match db::deliveries::create_attempt(pool, webhook.id, event_type, payload).await {
                Ok(d) => d,
                Err(e) => {
                    tracing::error!("Failed to create delivery row for {}: {e}", webhook.name);
                    return;
                }
            };

        // The signed message and the request body are the same canonical
        // bytes, so the receiver can verify over what it was sent.
        let body = signature::canonical_json(payload);
        let digest = signature::sign(payload, &webhook.secret);

        let result = self
            .client
            .post(&webhook.target_url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .header("X-Webhook-Signature", digest)
            .header("X-Webhook-Event", event_type)
            .header("User-Agent", USER_AGENT)
            .body(body)
            .send()
            .await;

        let recorded = match result {
            Ok(resp) => {
                let status = resp.status().as_u16() as i32;
                let success = (200..300).contains(&status);
                let text: String = resp
                    .text()
                    .await
                    .unwrap_or_default()
                    .chars()
                    .take(1000)
                    .collect();
                db::deliveries::record_response(pool, delivery.id, status, &text, success).await
            }
            Err(e) if e.is_timeout() => {
                db::deliveries::record_failure(pool, delivery.id, "Request timeout").await
            }
            Err(e) => {
                let message: String = e.to_string().chars().take(500).collect();
                db::deliveries::record_failure(pool, delivery.id, &message).await
            }
        };

        if let Err(e) = recorded {
            tracing::error!("Failed to record outcome for delivery {}: {e}", delivery.id);
        }
    }
}
