//! Composition root: vault, session, gateway, catalog engine, navigation.

use crate::config::AppConfig;
use mithai_catalog::{engine, CatalogHandle};
use mithai_client::ApiClient;
use mithai_guard::{decide, Decision, Route};
use mithai_session::{Destination, JsonFileVault, SessionStore};
use std::sync::Arc;
use tracing::info;

/// Map a session-store navigation intent onto the route table.
pub fn route_for(destination: Destination) -> Route {
    match destination {
        Destination::Login => Route::Login,
        Destination::Dashboard => Route::Dashboard,
        Destination::AdminConsole => Route::Admin,
    }
}

/// The assembled client.
///
/// Owns the one session store and the one catalog engine; every view works
/// against these shared instances. Must be started inside a tokio runtime.
pub struct AppShell {
    pub session: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    pub catalog: CatalogHandle,
    current: Route,
}

impl AppShell {
    /// Wire everything up: hydrate the persisted session, build the
    /// gateway over it, and start the catalog engine.
    pub fn start(config: AppConfig) -> Self {
        let vault = JsonFileVault::new(&config.vault_path);
        let session = Arc::new(SessionStore::new(Box::new(vault)));
        session.hydrate();
        if session.session().is_authenticated() {
            info!("restored persisted session");
        }

        let api = Arc::new(ApiClient::new(
            config.api_base_url.clone(),
            Arc::clone(&session),
        ));
        let catalog = engine::spawn(Arc::clone(&api));

        Self {
            session,
            api,
            catalog,
            current: Route::Home,
        }
    }

    /// The route currently shown.
    pub fn current(&self) -> Route {
        self.current
    }

    /// Attempt to show a route; the guard may send the user elsewhere.
    /// Returns what actually rendered.
    pub fn navigate(&mut self, route: Route) -> Route {
        self.current = match decide(&self.session.session(), route) {
            Decision::Render => route,
            Decision::Redirect(target) => target,
        };
        self.current
    }

    /// Follow a session-store navigation intent.
    pub fn go(&mut self, destination: Destination) -> Route {
        self.navigate(route_for(destination))
    }

    /// Log out and land on the login view.
    pub fn logout(&mut self) -> Route {
        let destination = self.session.logout();
        self.go(destination)
    }
}
