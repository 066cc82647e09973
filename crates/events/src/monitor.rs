//! Computer count threshold monitor.
//!
//! Every successful create or update hands the owning employee to
//! [`ThresholdMonitor::on_write`], which counts that employee's computers on
//! a detached task and alerts an admin once the count reaches the
//! configured threshold. The write path never waits for, or learns about,
//! the outcome. Every qualifying write alerts again; nothing is deduplicated.

use std::sync::Arc;

use computer_manager_db::ComputerStore;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::notifier::AdminNotifier;

/// Default minimum number of computers per employee that triggers an alarm.
pub const DEFAULT_THRESHOLD: i64 = 3;

/// Result of a single background count check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCheck {
    /// The count query failed; nothing was sent.
    Failed,
    /// The employee owns fewer computers than the threshold.
    BelowThreshold { computer_count: i64 },
    /// The notifier was invoked with this count.
    Notified { computer_count: i64 },
}

/// Watches per-employee computer counts after writes.
#[derive(Clone)]
pub struct ThresholdMonitor {
    store: Arc<dyn ComputerStore>,
    notifier: Arc<dyn AdminNotifier>,
    threshold: i64,
}

impl ThresholdMonitor {
    pub fn new(
        store: Arc<dyn ComputerStore>,
        notifier: Arc<dyn AdminNotifier>,
        threshold: i64,
    ) -> Self {
        Self {
            store,
            notifier,
            threshold,
        }
    }

    /// Spawn the count check for `employee_abbr` and return immediately.
    ///
    /// The handle is only for observation; dropping it leaves the task running.
    pub fn on_write(&self, employee_abbr: &str) -> JoinHandle<CountCheck> {
        let monitor = self.clone();
        let employee_abbr = employee_abbr.to_string();
        let span = tracing::info_span!("computer_count_check", employee_abbr = %employee_abbr);

        tokio::spawn(
            async move { monitor.check_computer_count(&employee_abbr).await }.instrument(span),
        )
    }

    /// Count the employee's computers and notify if the threshold is reached.
    pub async fn check_computer_count(&self, employee_abbr: &str) -> CountCheck {
        let computer_count = match self.store.count_for_employee(employee_abbr).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(
                    employee_abbr,
                    error = %e,
                    "Failed to get computer count for employee from database"
                );
                return CountCheck::Failed;
            }
        };

        tracing::info!(employee_abbr, computer_count, "Employee computer count checked");

        if computer_count < self.threshold {
            return CountCheck::BelowThreshold { computer_count };
        }

        self.notifier
            .notify_admin(employee_abbr, computer_count)
            .await;
        CountCheck::Notified { computer_count }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
