use serde::Serialize;
use thiserror::Error;

use crate::modules::health::domain::DataCategory;

/// Error taxonomy for the monitor and the health store behind it.
///
/// Every variant is local and non-fatal: the monitor logs or swallows them
/// according to the policy documented on each operation, and nothing here
/// ever crosses a process or user-facing boundary.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum MonitorError {
    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Observer subscription failed: {0}")]
    Subscription(String),

    #[error("Data category unavailable: {0}")]
    CategoryUnavailable(DataCategory),

    #[error("Sample query failed: {0}")]
    Query(String),

    #[error("Display unavailable: {0}")]
    Display(String),
}

// Result type alias for convenience
pub type MonitorResult<T> = Result<T, MonitorError>;
