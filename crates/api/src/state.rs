use std::sync::Arc;

use computer_manager_db::ComputerStore;
use computer_manager_events::{AdminNotifier, ThresholdMonitor};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The record store shared by every request.
    pub store: Arc<dyn ComputerStore>,
    /// Post-write computer count check, reading from the same `store`.
    pub monitor: ThresholdMonitor,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ComputerStore>,
        notifier: Arc<dyn AdminNotifier>,
        notification_threshold: i64,
    ) -> Self {
        let monitor = ThresholdMonitor::new(Arc::clone(&store), notifier, notification_threshold);
        Self { store, monitor }
    }
}
