//! Session state.

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// The current authentication state of the client.
///
/// A role is only ever carried alongside a token; the enum makes the
/// "role is meaningless without a token" invariant unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Session {
    /// No token present.
    #[default]
    Anonymous,
    /// Logged in with an opaque bearer token.
    Authenticated {
        token: String,
        /// Role as reported by the server at login. Absent when the server
        /// did not include one; treated as a non-admin by consumers.
        role: Option<Role>,
    },
}

impl Session {
    /// Create an authenticated session.
    pub fn authenticated(token: impl Into<String>, role: Option<Role>) -> Self {
        Session::Authenticated {
            token: token.into(),
            role,
        }
    }

    /// Check if a token is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Get the bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    /// Get the role, if any.
    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Authenticated { role, .. } => *role,
            Session::Anonymous => None,
        }
    }

    /// Check if this session carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role().map(|r| r.is_admin()).unwrap_or(false)
    }
}
