//! Error types for the chat API client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL {0:?}")]
    InvalidBaseUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
