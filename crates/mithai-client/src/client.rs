//! The API gateway client.

use crate::gateway::{AuthApi, AuthResponse, CatalogApi, InventoryApi, PurchaseApi};
use crate::ApiError;
use async_trait::async_trait;
use mithai_core::{PurchaseReceipt, PurchaseRecord, SearchCriteria, Sweet, SweetId, SweetInput};
use mithai_session::SessionStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Body shape of error responses from the storefront API.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    msg: String,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct PurchaseBody {
    quantity: u32,
}

/// HTTP client for the storefront API.
///
/// Holds the session store by reference and injects the current bearer
/// token into every request that has one. Uniform failure translation
/// happens here and nowhere else.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://host:5000/api`).
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    /// Resolve a path against the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Attach the bearer token when the session has one. Without a token
    /// the request goes out unauthenticated and the server decides.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and translate failures into [`ApiError`].
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let server_message = serde_json::from_str::<ServerMessage>(&body)
            .ok()
            .map(|m| m.msg);
        debug!(status = status.as_u16(), "request rejected by server");

        Err(ApiError::Http {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            server_message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.get(self.url(path)));
        let response = self.send(request).await?;
        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginBody { username, password });
        let response = self.send(request).await?;
        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let request = self.http.post(self.url("/auth/register")).json(&RegisterBody {
            username,
            email,
            password,
        });
        let response = self.send(request).await?;
        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn list_sweets(&self) -> Result<Vec<Sweet>, ApiError> {
        self.get_json("/sweets/").await
    }

    async fn search_sweets(&self, criteria: &SearchCriteria) -> Result<Vec<Sweet>, ApiError> {
        let pairs = criteria.to_query_pairs();
        if pairs.is_empty() {
            // No criteria means no search endpoint to hit.
            return self.list_sweets().await;
        }
        let request = self
            .authorize(self.http.get(self.url("/sweets/search")))
            .query(&pairs);
        let response = self.send(request).await?;
        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PurchaseApi for ApiClient {
    async fn purchase(&self, id: &SweetId, quantity: u32) -> Result<PurchaseReceipt, ApiError> {
        let request = self
            .authorize(self.http.post(self.url(&format!("/sweets/{}/purchase", id))))
            .json(&PurchaseBody { quantity });
        let response = self.send(request).await?;
        response.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn purchase_history(&self) -> Result<Vec<PurchaseRecord>, ApiError> {
        self.get_json("/purchases/history").await
    }
}

#[async_trait]
impl InventoryApi for ApiClient {
    async fn create_sweet(&self, input: &SweetInput) -> Result<(), ApiError> {
        let request = self
            .authorize(self.http.post(self.url("/sweets/")))
            .json(input);
        self.send(request).await?;
        Ok(())
    }

    async fn update_sweet(&self, id: &SweetId, input: &SweetInput) -> Result<(), ApiError> {
        let request = self
            .authorize(self.http.put(self.url(&format!("/sweets/{}", id))))
            .json(input);
        self.send(request).await?;
        Ok(())
    }

    async fn delete_sweet(&self, id: &SweetId) -> Result<(), ApiError> {
        let request = self.authorize(self.http.delete(self.url(&format!("/sweets/{}", id))));
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mithai_session::MemoryVault;

    fn client(base: &str) -> ApiClient {
        let session = Arc::new(SessionStore::new(Box::new(MemoryVault::new())));
        ApiClient::new(base, session)
    }

    #[test]
    fn test_url_joining_tolerates_trailing_slash() {
        let c = client("http://localhost:5000/api/");
        assert_eq!(c.url("/sweets/"), "http://localhost:5000/api/sweets/");

        let c = client("http://localhost:5000/api");
        assert_eq!(c.url("/sweets/search"), "http://localhost:5000/api/sweets/search");
    }

    #[test]
    fn test_purchase_path_embeds_id() {
        let c = client("http://localhost:5000/api");
        let id = SweetId::new("66b2f0");
        assert_eq!(
            c.url(&format!("/sweets/{}/purchase", id)),
            "http://localhost:5000/api/sweets/66b2f0/purchase"
        );
    }

    #[test]
    fn test_server_message_body_shape() {
        let parsed: ServerMessage =
            serde_json::from_str(r#"{"msg":"Not enough stock available"}"#).unwrap();
        assert_eq!(parsed.msg, "Not enough stock available");
    }
}
