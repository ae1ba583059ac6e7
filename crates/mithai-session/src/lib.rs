//! Session management for Mithai.
//!
//! The session store is the single source of truth for "who is logged in":
//! an explicit, injectable object with a defined lifecycle (hydrate on
//! startup, mutate on login/logout, never elsewhere). Consumers hold it by
//! reference and subscribe for changes; nothing here is ambient global
//! state.

mod error;
mod role;
mod session;
mod store;
mod vault;

pub use error::SessionError;
pub use role::Role;
pub use session::Session;
pub use store::{Destination, SessionStore};
pub use vault::{JsonFileVault, MemoryVault, SessionVault, ROLE_KEY, TOKEN_KEY};
