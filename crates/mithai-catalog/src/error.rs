//! Catalog error types.

use mithai_client::ApiError;
use mithai_core::DomainError;
use thiserror::Error;

/// Errors surfaced by the catalog engine and its views.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A domain rule rejected the operation before any request was made.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The server rejected the operation.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The engine task is no longer running.
    #[error("catalog engine stopped")]
    EngineClosed,
}

impl CatalogError {
    /// The message to show a person, preferring the server's wording.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Api(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}
