//! Catalog state management for Mithai.
//!
//! The centerpiece is the [`engine`]: a single task that owns the visible
//! item list and reconciles local text/category/price filters with
//! server-side search calls. Around it sit the purchase quantity picker,
//! the purchase history view, and the admin inventory console.

pub mod admin;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod history;
pub mod picker;

pub use admin::{InventoryConsole, SweetForm};
pub use engine::{spawn, CatalogHandle, CatalogView, DEBOUNCE_DELAY};
pub use error::CatalogError;
pub use history::{HistoryTotals, HistoryView};
pub use picker::QuantityPicker;
