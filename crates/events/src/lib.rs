//! Post-write side effects: the admin notifier and the computer count
//! threshold monitor that drives it.

pub mod monitor;
pub mod notifier;

pub use monitor::{CountCheck, ThresholdMonitor};
pub use notifier::{AdminNotifier, HttpAdminNotifier, NotificationError};
