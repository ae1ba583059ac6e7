//! Session persistence errors.

use thiserror::Error;

/// Errors from the durable session vault.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Underlying storage failed.
    #[error("vault error: {0}")]
    Vault(String),

    /// Stored data could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Vault(e.to_string())
    }
}
