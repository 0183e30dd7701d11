use std::fmt;

use async_trait::async_trait;

use super::types::Country;

/// Errors that can occur while fetching the dataset.
/// None of them carries partial data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Endpoint answered with a non-success status.
    Api { status: u16, message: String },
    /// Body was not the JSON array we expect.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Read-only access to the full country dataset.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Fetches every country in delivery order. No retries happen here.
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError>;
}
