use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

use leaveflow::config::{Config, SmtpConfig};

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Option<&str>,
    ) -> (Value, StatusCode) {
        let mut body = json!({ "email": email, "password": password, "name": name });
        if let Some(role) = role {
            body["role"] = json!(role);
        }
        let resp = self
            .client
            .post(self.url("/api/v1/auth/register"))
            .json(&body)
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register a user and return their access token.
    pub async fn user_token(&self, email: &str, role: &str) -> String {
        let (body, status) = self
            .register(email, "password123", email.split('@').next().unwrap(), Some(role))
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Seed a leave type directly in the database.
    pub async fn seed_leave_type(&self, name: &str, days_allowed: i32) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO leave_types (name, days_allowed) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(days_allowed)
        .fetch_one(&self.pool)
        .await
        .expect("failed to seed leave type")
    }

    pub async fn create_leave(
        &self,
        token: &str,
        leave_type_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        reason: &str,
    ) -> (Value, StatusCode) {
        self.post_auth(
            "/api/v1/leaves",
            token,
            &json!({
                "leave_type_id": leave_type_id,
                "start_date": start,
                "end_date": end,
                "reason": reason,
            }),
        )
        .await
    }

    pub async fn decide(
        &self,
        token: &str,
        leave_id: &str,
        action: &str,
        comment: &str,
    ) -> (Value, StatusCode) {
        self.post_auth(
            &format!("/api/v1/leaves/{leave_id}/action"),
            token,
            &json!({ "action": action, "comment": comment }),
        )
        .await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_smtp(None).await
}

/// Spawn a test app whose mailer points at a dead SMTP relay, so every send
/// attempt fails at connect time.
pub async fn spawn_app_with_broken_smtp() -> TestApp {
    // Port 1 refuses connections.
    spawn_app_with_smtp(Some(SmtpConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        user: "mailer".to_string(),
        pass: "mailer".to_string(),
        from: "noreply@test.com".to_string(),
    }))
    .await
}

async fn spawn_app_with_smtp(smtp: Option<SmtpConfig>) -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!(
        "leaveflow_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    );

    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        webhook_timeout_secs: 2,
        log_level: "warn".to_string(),
        smtp,
    };

    let app = leaveflow::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}

// ── Stub webhook receiver ───────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ReceivedCall {
    pub body: String,
    pub signature: String,
    pub event: String,
    pub user_agent: String,
    pub content_type: String,
}

pub type ReceivedCalls = Arc<Mutex<Vec<ReceivedCall>>>;

async fn record_call(calls: &ReceivedCalls, headers: HeaderMap, body: String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    calls.lock().await.push(ReceivedCall {
        body,
        signature: header("x-webhook-signature"),
        event: header("x-webhook-event"),
        user_agent: header("user-agent"),
        content_type: header("content-type"),
    });
}

async fn hook_ok(State(calls): State<ReceivedCalls>, headers: HeaderMap, body: String) -> StatusCode {
    record_call(&calls, headers, body).await;
    StatusCode::OK
}

async fn hook_fail(
    State(calls): State<ReceivedCalls>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    record_call(&calls, headers, body).await;
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn hook_slow(
    State(calls): State<ReceivedCalls>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    tokio::time::sleep(std::time::Duration::from_secs(10)).await;
    record_call(&calls, headers, body).await;
    StatusCode::OK
}

/// Spawn a local HTTP server that records incoming webhook calls.
/// `/hook` answers 200, `/fail` answers 500, `/slow` hangs for 10 s.
pub async fn spawn_receiver() -> (SocketAddr, ReceivedCalls) {
    let calls: ReceivedCalls = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/hook", post(hook_ok))
        .route("/fail", post(hook_fail))
        .route("/slow", post(hook_slow))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind receiver port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Receiver failed");
    });

    (addr, calls)
}
