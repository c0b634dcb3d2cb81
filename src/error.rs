use thiserror::Error;

/// Failure reported by the query or execute interface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Transport or node failure, usually transient
    #[error("Remote unavailable: {0}")]
    Unavailable(String),

    /// The contract refused the message
    #[error("Rejected by contract: {0}")]
    Rejected(String),

    /// The response did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Document store client error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Query failed: {0}")]
    Query(#[source] RemoteError),

    #[error("Write failed: {0}")]
    Write(#[source] RemoteError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// The remote error behind a failed query or write, if any
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            StoreError::Query(e) | StoreError::Write(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for document store operations
pub type Result<T> = std::result::Result<T, StoreError>;
