use std::str::FromStr;
use std::time::Duration;

use computer_manager_events::monitor::DEFAULT_THRESHOLD;
use computer_manager_events::notifier::DEFAULT_REQUEST_TIMEOUT;

/// Error raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// PostgreSQL connection string. Required.
    pub database_url: String,
    /// Endpoint of the admin notification service. Required.
    pub notification_url: String,
    /// Computer count per employee at which an admin is notified (default: `3`).
    pub notification_threshold: i64,
    /// Timeout of a single notification request in seconds (default: `10`).
    pub notification_timeout_secs: u64,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                        | Default     |
    /// |--------------------------------|-------------|
    /// | `DATABASE_URL`                 | required    |
    /// | `NOTIFICATION_URL`             | required    |
    /// | `ADMIN_NOTIFICATION_THRESHOLD` | `3`         |
    /// | `NOTIFICATION_TIMEOUT_SECS`    | `10`        |
    /// | `HOST`                         | `0.0.0.0`   |
    /// | `PORT`                         | `8080`      |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let notification_url = required("NOTIFICATION_URL")?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8080u16)?;
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let notification_timeout_secs = parse_or(
            &lookup,
            "NOTIFICATION_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?;

        let notification_threshold =
            parse_or(&lookup, "ADMIN_NOTIFICATION_THRESHOLD", DEFAULT_THRESHOLD)?;
        if notification_threshold < 1 {
            return Err(ConfigError::Invalid {
                name: "ADMIN_NOTIFICATION_THRESHOLD",
                value: notification_threshold.to_string(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(Self {
            host,
            port,
            database_url,
            notification_url,
            notification_threshold,
            notification_timeout_secs,
            request_timeout_secs,
        })
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    let parsed: Result<T, T::Err> = value.trim().parse();
    parsed.map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}
