// Error handling framework for the executors dashboard

use thiserror::Error;

/// Errors raised while fetching executor summaries from the backend
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Executors request failed: {0}")]
    Request(String),

    #[error("Executors endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid executors payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short machine-readable reason, used as a metrics label
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Client(_) => "client",
            FetchError::Request(_) => "request",
            FetchError::Status { .. } => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Errors raised while interpreting table sort and paging requests
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid sort direction '{direction}' for column {column}")]
    InvalidDirection { column: String, direction: String },

    #[error("Invalid page limit {limit}: must be between 1 and {max}")]
    InvalidLimit { limit: i64, max: i64 },

    #[error("Invalid page offset {0}: must not be negative")]
    InvalidOffset(i64),
}
