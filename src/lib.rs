pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod db;
pub mod models;
pub mod workflow;
pub mod notify;
pub mod email;
pub mod webhooks;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::SystemMailer;
use crate::notify::Notifier;
use crate::state::{AppState, SharedState};
use crate::webhooks::WebhookDispatcher;

pub fn build_app(pool: PgPool, config: Config) -> Router {
    // Mail is optional; notifications still persist without it
    let mailer = config.smtp.as_ref().and_then(|smtp| match SystemMailer::new(smtp) {
        Ok(mailer) => {
            tracing::info!("System SMTP configured");
            Some(Arc::new(mailer))
        }
        Err(e) => {
            tracing::warn!("System SMTP not available: {e}");
            None
        }
    });

    let dispatcher = WebhookDispatcher::new(Duration::from_secs(config.webhook_timeout_secs));
    let notifier = Notifier::new(mailer);

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        notifier,
        dispatcher,
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
