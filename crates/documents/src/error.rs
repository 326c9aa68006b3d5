//! Document error model.

use std::io;

use thiserror::Error;

/// Result type used across the document layer.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document-level error.
///
/// Layout is deterministic and pure, so nothing here is retryable: a failed
/// render reproduces the same failure on identical input, and no partial
/// artifact is ever handed out.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input shape violates the minimal structural contract
    /// (a required numeric field is not a usable number).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The host-level save step failed. The staging resource has already
    /// been released by the time this surfaces.
    #[error("delivery failed: {0}")]
    DeliveryFailure(#[from] io::Error),
}

impl DocumentError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}
