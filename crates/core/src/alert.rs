//! Admin alarm sent when an employee owns too many computers.

use serde::Serialize;

/// Severity tag carried by an [`AdminAlarm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
}

/// Payload posted to the external notification service.
///
/// Built fresh for every threshold breach and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminAlarm {
    pub level: AlertLevel,
    #[serde(rename = "employeeAbbreviation")]
    pub employee_abbr: String,
    pub message: String,
}

impl AdminAlarm {
    /// Build the warning for an employee who now owns `computer_count` computers.
    pub fn computer_count_exceeded(employee_abbr: &str, computer_count: i64) -> Self {
        Self {
            level: AlertLevel::Warning,
            employee_abbr: employee_abbr.to_string(),
            message: format!("employee {employee_abbr} has {computer_count} computers"),
        }
    }
}
