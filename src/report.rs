//! JSON bodies returned by the health route.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Package version baked in at build time.
pub const VERSION: &str = match option_env!("CARGO_PKG_VERSION") {
    Some(version) => version,
    None => "unknown",
};

/// Message used when a failure carries no usable description.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Error,
}

/// Current UTC time as ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: String,
    /// Seconds since process start
    pub uptime: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub version: &'static str,
}

impl HealthReport {
    pub fn healthy(uptime: f64, environment: Option<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: iso_timestamp(),
            uptime,
            environment,
            version: VERSION,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub status: HealthStatus,
    pub error: String,
    pub timestamp: String,
}

impl ErrorReport {
    pub fn new(status: HealthStatus, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.is_empty() {
            error = UNKNOWN_ERROR.to_string();
        }
        Self {
            status,
            error,
            timestamp: iso_timestamp(),
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self::new(HealthStatus::Unhealthy, error)
    }
}
