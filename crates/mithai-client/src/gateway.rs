//! Gateway traits and auth wire types.
//!
//! The traits are the seams between the views and the network: the real
//! [`ApiClient`](crate::ApiClient) implements all of them, and tests swap in
//! in-memory fakes.

use crate::ApiError;
use async_trait::async_trait;
use mithai_core::{PurchaseReceipt, PurchaseRecord, SearchCriteria, Sweet, SweetId, SweetInput};
use mithai_session::Role;
use serde::{Deserialize, Serialize};

/// Response from the login and register endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Role string; the register endpoint may omit it.
    #[serde(default)]
    pub role: Option<String>,
}

impl AuthResponse {
    /// Parse the role string, ignoring values the client does not know.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

/// Authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError>;

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError>;
}

/// Catalog read endpoints.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the full catalog, unfiltered.
    async fn list_sweets(&self) -> Result<Vec<Sweet>, ApiError>;

    /// Server-side filtered search.
    async fn search_sweets(&self, criteria: &SearchCriteria) -> Result<Vec<Sweet>, ApiError>;
}

/// Purchase endpoints.
#[async_trait]
pub trait PurchaseApi: Send + Sync {
    /// Buy `quantity` units of an item.
    async fn purchase(&self, id: &SweetId, quantity: u32) -> Result<PurchaseReceipt, ApiError>;

    /// The caller's purchase history (all purchases for admins).
    async fn purchase_history(&self) -> Result<Vec<PurchaseRecord>, ApiError>;
}

/// Admin inventory mutation endpoints.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn create_sweet(&self, input: &SweetInput) -> Result<(), ApiError>;

    async fn update_sweet(&self, id: &SweetId, input: &SweetInput) -> Result<(), ApiError>;

    async fn delete_sweet(&self, id: &SweetId) -> Result<(), ApiError>;
}
