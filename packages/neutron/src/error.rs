//! Error types exposed by this package.

use std::time::Duration;

/// Errors from a single REST query against the node.
///
/// Upstream error bodies are preferred over the raw transport error whenever
/// the node returned one.
#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    #[error("Error performing request to {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("Error response from {url} ({status}): {message}")]
    Upstream {
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("Unexpected response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
    #[error("Could not encode contract query: {0}")]
    EncodeQuery(#[from] serde_json::Error),
}

/// A transaction broadcast that the node rejected outright.
#[derive(thiserror::Error, Debug)]
#[error("Transaction broadcast failed with code {code}. Raw log: {raw_log}")]
pub struct BroadcastError {
    pub code: u32,
    pub raw_log: String,
}

/// Errors while waiting on the block-commit event stream.
#[derive(thiserror::Error, Debug)]
pub enum WaitError {
    #[error("Timed out after {timeout:?} waiting for new blocks")]
    Timeout { timeout: Duration },
    #[error("Event stream connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("Event stream closed before enough blocks arrived")]
    StreamClosed,
}
