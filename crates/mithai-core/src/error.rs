//! Domain error types.

use thiserror::Error;

/// Errors arising from domain rules, before any request is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Requested quantity is not a positive integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Requested quantity exceeds the stock visible to the client.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Item is not present in the current working set.
    #[error("unknown item: {0}")]
    UnknownItem(String),
}
