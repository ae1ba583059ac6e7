//! Gateway error types.

use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        /// Generic description of the failure.
        message: String,
        /// The server's own `msg` body field, when the body carried one.
        server_message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// The message to show a person: the server's own wording when it sent
    /// any, otherwise the generic description.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Http {
                server_message: Some(msg),
                ..
            } => msg,
            ApiError::Http { message, .. } => message,
            ApiError::Request(msg) => msg,
            ApiError::Parse(msg) => msg,
        }
    }

    /// The HTTP status, when the failure came from a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check for a 401/403 answer. The gateway never acts on these itself;
    /// callers that care can.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}
