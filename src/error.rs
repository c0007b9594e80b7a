use std::time::Duration;

use crate::models::Platform;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SalaryError {
    #[error("no usable salary data")]
    NoUsableData,
    #[error("salary estimate does not fit in 64 bits")]
    OutOfRange,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration: {key} must be set")]
    Missing { key: &'static str },
    #[error("invalid configuration: {key}={value:?} is not a valid number")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{platform} responded with HTTP {status} for {url}")]
    Status {
        platform: Platform,
        status: u16,
        url: String,
    },
    #[error("{platform} request timed out after {timeout:?}")]
    Timeout {
        platform: Platform,
        timeout: Duration,
    },
    #[error("{platform} request failed: {source}")]
    Transport {
        platform: Platform,
        #[source]
        source: reqwest::Error,
    },
    #[error("{platform} returned an unexpected payload: {source}")]
    Decode {
        platform: Platform,
        #[source]
        source: serde_json::Error,
    },
}
