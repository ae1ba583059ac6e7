//! Composition root for the Mithai storefront client.
//!
//! Pulls the session store, gateway client, route guard, and catalog
//! engine together behind one [`AppShell`], and owns the ambient concerns
//! the rest of the workspace stays out of: configuration loading and the
//! tracing subscriber.

pub mod auth;
pub mod config;
pub mod shell;

pub use auth::{LoginForm, RegisterForm};
pub use config::AppConfig;
pub use shell::{route_for, AppShell};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Call once at startup; respects
/// `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
