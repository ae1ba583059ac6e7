//! The session store.

use crate::role::Role;
use crate::session::Session;
use crate::vault::{SessionVault, ROLE_KEY, TOKEN_KEY};
use tokio::sync::watch;
use tracing::warn;

/// Where a session transition sends the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The login view.
    Login,
    /// The main dashboard (default authenticated view).
    Dashboard,
    /// The admin inventory console.
    AdminConsole,
}

/// Single source of truth for the current session.
///
/// Lifecycle: `hydrate` once at startup, `login`/`logout` afterwards,
/// nothing else mutates it. State transitions are pure: vault writes are
/// fire-and-forget, so a write failure is logged and never blocks the
/// in-memory transition.
pub struct SessionStore {
    vault: Box<dyn SessionVault>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Create a store over the given vault. The session starts anonymous
    /// until `hydrate` or `login` runs.
    pub fn new(vault: Box<dyn SessionVault>) -> Self {
        let (state, _) = watch::channel(Session::Anonymous);
        Self { vault, state }
    }

    /// Reconstruct session state from the vault. Startup only.
    ///
    /// The persisted token is trusted as-is, without server validation; a
    /// revoked or expired token is only discovered on the next failed API
    /// call.
    pub fn hydrate(&self) {
        let token = match self.vault.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "failed to read session vault, starting anonymous");
                return;
            }
        };
        let Some(token) = token else { return };

        let role = self
            .vault
            .get(ROLE_KEY)
            .unwrap_or_default()
            .and_then(|r| r.parse::<Role>().ok());

        self.state.send_replace(Session::authenticated(token, role));
    }

    /// Store a fresh session, overwriting any prior one unconditionally.
    ///
    /// Returns the role-based landing view: admins go to the inventory
    /// console, everyone else to the dashboard.
    pub fn login(&self, token: impl Into<String>, role: Option<Role>) -> Destination {
        let token = token.into();

        if let Err(e) = self.vault.set(TOKEN_KEY, &token) {
            warn!(error = %e, "failed to persist session token");
        }
        let role_write = match role {
            Some(role) => self.vault.set(ROLE_KEY, role.as_str()),
            None => self.vault.remove(ROLE_KEY),
        };
        if let Err(e) = role_write {
            warn!(error = %e, "failed to persist session role");
        }

        self.state.send_replace(Session::authenticated(token, role));

        match role {
            Some(Role::Admin) => Destination::AdminConsole,
            _ => Destination::Dashboard,
        }
    }

    /// Clear the session. Idempotent; always lands on the login view.
    pub fn logout(&self) -> Destination {
        if let Err(e) = self.vault.remove(TOKEN_KEY) {
            warn!(error = %e, "failed to clear session token");
        }
        if let Err(e) = self.vault.remove(ROLE_KEY) {
            warn!(error = %e, "failed to clear session role");
        }
        self.state.send_replace(Session::Anonymous);
        Destination::Login
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}
