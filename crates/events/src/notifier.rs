//! Admin notification delivery.
//!
//! [`HttpAdminNotifier`] posts a JSON-encoded [`AdminAlarm`] to the external
//! notification service. Each alarm gets exactly one attempt: failures are
//! logged and dropped.

use std::time::Duration;

use async_trait::async_trait;
use computer_manager_core::alert::AdminAlarm;
use reqwest::StatusCode;

/// Default HTTP request timeout for a single notification.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The notification service answered with something other than 200.
    #[error("Notification service returned HTTP {status}: {body:?}")]
    HttpStatus { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// AdminNotifier
// ---------------------------------------------------------------------------

/// One-way alert channel to an administrator.
///
/// Implementations never report failure to the caller.
#[async_trait]
pub trait AdminNotifier: Send + Sync {
    /// Tell an admin that `employee_abbr` now owns `computer_count` computers.
    async fn notify_admin(&self, employee_abbr: &str, computer_count: i64);
}

// ---------------------------------------------------------------------------
// HttpAdminNotifier
// ---------------------------------------------------------------------------

/// Delivers admin alarms to the notification service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAdminNotifier {
    client: reqwest::Client,
    url: String,
}

impl HttpAdminNotifier {
    /// Create a notifier posting to `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post one alarm and return the service's response body.
    ///
    /// Only `200 OK` counts as delivered.
    pub async fn send_alarm(&self, alarm: &AdminAlarm) -> Result<String, NotificationError> {
        let response = self.client.post(&self.url).json(alarm).send().await?;
        let status = response.status();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to read response body from admin notification service"
                );
                String::new()
            }
        };

        if status != StatusCode::OK {
            return Err(NotificationError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl AdminNotifier for HttpAdminNotifier {
    async fn notify_admin(&self, employee_abbr: &str, computer_count: i64) {
        let alarm = AdminAlarm::computer_count_exceeded(employee_abbr, computer_count);

        match self.send_alarm(&alarm).await {
            Ok(response) => {
                tracing::info!(employee_abbr, computer_count, %response, "Notified admin");
            }
            Err(e) => {
                tracing::error!(
                    employee_abbr,
                    computer_count,
                    url = %self.url,
                    error = %e,
                    "Admin notification failed"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
