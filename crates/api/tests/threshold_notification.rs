//! End-to-end tests for the post-write computer count check.
//!
//! Writes go through the HTTP router. Most tests replace the admin notifier
//! with a channel so the detached count checks can be observed; one runs the
//! real HTTP notifier against a local notification service.

mod common;

use std::sync::Arc;

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{
    body_json, computer, expect_no_notification, expect_notification, post_json, put_json,
};
use computer_manager_api::router::build_app_router;
use computer_manager_api::state::AppState;
use computer_manager_db::models::computer::Computer;
use computer_manager_db::{ComputerStore, MemoryComputerStore, StoreError};
use computer_manager_events::HttpAdminNotifier;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

fn new_computer_body(mac: &str, employee: &str) -> serde_json::Value {
    json!({
        "macAddr": mac,
        "computerName": "lenovo",
        "ipAddr": "192.158.1.38",
        "employeeAbbr": employee,
    })
}

// ---------------------------------------------------------------------------
// Crossing the threshold
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_third_computer_for_employee_notifies_admin() {
    let store = Arc::new(MemoryComputerStore::with_computers([
        computer("00:00:00:00:00:01", "mmu"),
        computer("00:00:00:00:00:02", "mmu"),
    ]));
    let (app, mut notifications) = common::build_test_app(store, 3);

    let response = post_json(
        app,
        "/computers",
        new_computer_body("00:00:00:00:00:03", "mmu"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["macAddr"], "00:00:00:00:00:03");

    assert_eq!(
        expect_notification(&mut notifications).await,
        ("mmu".to_string(), 3)
    );
    expect_no_notification(&mut notifications).await;
}

#[tokio::test]
async fn test_each_further_computer_notifies_again() {
    let store = Arc::new(MemoryComputerStore::with_computers([
        computer("00:00:00:00:00:01", "mmu"),
        computer("00:00:00:00:00:02", "mmu"),
    ]));
    let (app, mut notifications) = common::build_test_app(store, 3);

    post_json(
        app.clone(),
        "/computers",
        new_computer_body("00:00:00:00:00:03", "mmu"),
    )
    .await;
    assert_eq!(
        expect_notification(&mut notifications).await,
        ("mmu".to_string(), 3)
    );

    post_json(
        app,
        "/computers",
        new_computer_body("00:00:00:00:00:04", "mmu"),
    )
    .await;
    assert_eq!(
        expect_notification(&mut notifications).await,
        ("mmu".to_string(), 4)
    );
    expect_no_notification(&mut notifications).await;
}

#[tokio::test]
async fn test_unchanged_update_above_threshold_notifies_again() {
    let store = Arc::new(MemoryComputerStore::with_computers([
        computer("00:00:00:00:00:01", "mmu"),
        computer("00:00:00:00:00:02", "mmu"),
    ]));
    let (app, mut notifications) = common::build_test_app(store, 2);

    let response = put_json(
        app,
        "/computers/00:00:00:00:00:01",
        json!({
            "computerName": "lenovo",
            "ipAddr": "192.158.1.38",
            "employeeAbbr": "mmu",
            "description": "text",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        expect_notification(&mut notifications).await,
        ("mmu".to_string(), 2)
    );
}

#[tokio::test]
async fn test_reassigning_a_computer_checks_the_new_owner() {
    let store = Arc::new(MemoryComputerStore::with_computers([
        computer("00:00:00:00:00:01", "abc"),
        computer("00:00:00:00:00:02", "abc"),
        computer("00:00:00:00:00:03", "mmu"),
    ]));
    let (app, mut notifications) = common::build_test_app(store, 3);

    put_json(
        app,
        "/computers/00:00:00:00:00:03",
        json!({"computerName": "lenovo", "ipAddr": "10.0.0.3", "employeeAbbr": "abc"}),
    )
    .await;

    assert_eq!(
        expect_notification(&mut notifications).await,
        ("abc".to_string(), 3)
    );
}

// ---------------------------------------------------------------------------
// Staying below the threshold
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_below_threshold_writes_never_notify() {
    let store = Arc::new(MemoryComputerStore::with_computers([computer(
        "00:00:00:00:00:01",
        "mmu",
    )]));
    let (app, mut notifications) = common::build_test_app(store, 3);

    // Count stays at 1 for the update and the other employee ends up with 1.
    put_json(
        app.clone(),
        "/computers/00:00:00:00:00:01",
        json!({"computerName": "renamed", "ipAddr": "10.0.0.1", "employeeAbbr": "mmu"}),
    )
    .await;
    post_json(
        app,
        "/computers",
        new_computer_body("00:00:00:00:00:02", "abc"),
    )
    .await;

    expect_no_notification(&mut notifications).await;
}

#[tokio::test]
async fn test_failed_write_does_not_trigger_check() {
    let store = Arc::new(MemoryComputerStore::with_computers([
        computer("00:00:00:00:00:01", "mmu"),
        computer("00:00:00:00:00:02", "mmu"),
        computer("00:00:00:00:00:03", "mmu"),
    ]));
    let (app, mut notifications) = common::build_test_app(store, 3);

    let response = post_json(
        app,
        "/computers",
        new_computer_body("00:00:00:00:00:01", "mmu"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    expect_no_notification(&mut notifications).await;
}

// ---------------------------------------------------------------------------
// Count failures stay in the background
// ---------------------------------------------------------------------------

/// Store that accepts writes but cannot count.
struct CountlessStore {
    inner: MemoryComputerStore,
}

#[async_trait]
impl ComputerStore for CountlessStore {
    async fn create(&self, computer: &Computer) -> Result<Computer, StoreError> {
        self.inner.create(computer).await
    }
    async fn read(&self, mac_addr: &str) -> Result<Computer, StoreError> {
        self.inner.read(mac_addr).await
    }
    async fn update(&self, computer: &Computer) -> Result<Computer, StoreError> {
        self.inner.update(computer).await
    }
    async fn delete(&self, mac_addr: &str) -> Result<(), StoreError> {
        self.inner.delete(mac_addr).await
    }
    async fn read_all(&self) -> Result<Vec<Computer>, StoreError> {
        self.inner.read_all().await
    }
    async fn read_all_for_employee(&self, abbr: &str) -> Result<Vec<Computer>, StoreError> {
        self.inner.read_all_for_employee(abbr).await
    }
    async fn count_for_employee(&self, _: &str) -> Result<i64, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn test_count_failure_does_not_affect_response() {
    let store = Arc::new(CountlessStore {
        inner: MemoryComputerStore::new(),
    });
    let (app, mut notifications) = common::build_test_app(store, 1);

    let response = post_json(
        app,
        "/computers",
        new_computer_body("00:00:00:00:00:01", "mmu"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["employeeAbbr"], "mmu");
    expect_no_notification(&mut notifications).await;
}

// ---------------------------------------------------------------------------
// Delivery over HTTP
// ---------------------------------------------------------------------------

/// Start a local notification service that answers 200 and forwards every
/// received JSON body to the returned channel.
async fn spawn_notification_service() -> (String, mpsc::UnboundedReceiver<serde_json::Value>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new().route(
        "/notify",
        post(move |Json(body): Json<serde_json::Value>| async move {
            let _ = tx.send(body);
            "notified"
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/notify"), rx)
}

#[tokio::test]
async fn test_third_computer_posts_alarm_to_notification_service() {
    let (url, mut received) = spawn_notification_service().await;
    let notifier = HttpAdminNotifier::new(url, Duration::from_secs(2)).unwrap();
    let store = Arc::new(MemoryComputerStore::with_computers([
        computer("00:00:00:00:00:01", "mmu"),
        computer("00:00:00:00:00:02", "mmu"),
    ]));
    let state = AppState::new(store, Arc::new(notifier), 3);
    let app = build_app_router(state, &common::test_config());

    let response = post_json(
        app,
        "/computers",
        new_computer_body("00:00:00:00:00:03", "mmu"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let alarm = tokio::time::timeout(Duration::from_secs(2), received.recv())
        .await
        .expect("timed out waiting for the notification service")
        .expect("notification channel closed");
    assert_eq!(
        alarm,
        json!({
            "level": "warning",
            "employeeAbbreviation": "mmu",
            "message": "employee mmu has 3 computers",
        })
    );
}
