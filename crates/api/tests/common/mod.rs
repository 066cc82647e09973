#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::mpsc;
use tower::ServiceExt;

use computer_manager_api::config::ServerConfig;
use computer_manager_api::router::build_app_router;
use computer_manager_api::state::AppState;
use computer_manager_db::models::computer::Computer;
use computer_manager_db::ComputerStore;
use computer_manager_events::AdminNotifier;

/// How long to wait for a notification that is expected to arrive.
const NOTIFICATION_WAIT: Duration = Duration::from_secs(2);

/// How long to watch for a notification that must not arrive.
const QUIET_PERIOD: Duration = Duration::from_millis(200);

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        notification_url: "http://unused".to_string(),
        notification_threshold: 3,
        notification_timeout_secs: 1,
        request_timeout_secs: 30,
    }
}

/// Notifier that forwards every invocation to a channel.
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<(String, i64)>,
}

#[async_trait]
impl AdminNotifier for RecordingNotifier {
    async fn notify_admin(&self, employee_abbr: &str, computer_count: i64) {
        let _ = self.tx.send((employee_abbr.to_string(), computer_count));
    }
}

pub type Notifications = mpsc::UnboundedReceiver<(String, i64)>;

/// Build the full application router around `store`, with the given
/// notification threshold and a recording notifier.
///
/// Uses the same middleware stack as `main.rs`.
pub fn build_test_app(store: Arc<dyn ComputerStore>, threshold: i64) -> (Router, Notifications) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = AppState::new(store, Arc::new(RecordingNotifier { tx }), threshold);
    let config = ServerConfig {
        notification_threshold: threshold,
        ..test_config()
    };
    (build_app_router(state, &config), rx)
}

pub fn computer(mac: &str, employee: &str) -> Computer {
    Computer {
        mac_addr: mac.to_string(),
        computer_name: "lenovo".to_string(),
        ip_addr: "192.158.1.38".to_string(),
        employee_abbr: employee.to_string(),
        description: "text".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Wait for the next notification, failing the test if none arrives.
pub async fn expect_notification(rx: &mut Notifications) -> (String, i64) {
    tokio::time::timeout(NOTIFICATION_WAIT, rx.recv())
        .await
        .expect("timed out waiting for admin notification")
        .expect("notification channel closed")
}

/// Assert that no notification arrives within a short quiet period.
pub async fn expect_no_notification(rx: &mut Notifications) {
    if let Ok(Some(notification)) = tokio::time::timeout(QUIET_PERIOD, rx.recv()).await {
        panic!("unexpected admin notification: {notification:?}");
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body.to_string())).await
}

/// Send a raw, possibly malformed, JSON body.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> Response {
    send(app, method, uri, Some(body.to_string())).await
}

/// POST `body` without a `Content-Type` header.
pub async fn post_untyped(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
