// src/error.rs
use std::time::Duration;

use thiserror::Error;

/// Failures talking to the chat service.
///
/// Every variant counts as a transport failure for retry purposes; replies
/// the endpoint flags as errors are not represented here.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("endpoint returned HTTP status {0}")]
    Status(u16),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode response body: {0}")]
    Decode(String),

    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

