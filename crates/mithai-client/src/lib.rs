//! HTTP gateway client for the Mithai storefront API.
//!
//! Every outbound request goes through [`ApiClient`]: it resolves the base
//! path, attaches the session's bearer token when one exists, and turns
//! network or non-2xx outcomes into a single [`ApiError`] shape. It does
//! nothing else on purpose: no retries, no token refresh, and no special
//! handling of 401/403 responses. The server is the sole enforcer of access
//! control and each caller decides what an auth failure means for its view.
//!
//! # Example
//!
//! ```rust,ignore
//! use mithai_client::ApiClient;
//! use mithai_session::{MemoryVault, SessionStore};
//! use std::sync::Arc;
//!
//! let session = Arc::new(SessionStore::new(Box::new(MemoryVault::new())));
//! let client = ApiClient::new("http://127.0.0.1:5000/api", session);
//!
//! let sweets = client.list_sweets().await?;
//! ```

mod client;
mod error;
mod gateway;

pub use client::ApiClient;
pub use error::ApiError;
pub use gateway::{AuthApi, AuthResponse, CatalogApi, InventoryApi, PurchaseApi};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiError, AuthApi, AuthResponse, CatalogApi, InventoryApi, PurchaseApi};
}
