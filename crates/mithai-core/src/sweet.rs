//! Catalog item types.

use crate::error::DomainError;
use crate::ids::SweetId;
use serde::{Deserialize, Serialize};

/// Quantity below which an item counts as running low.
const LOW_STOCK_THRESHOLD: u32 = 5;

/// A purchasable item in the catalog.
///
/// The authoritative copy lives server-side; the client's working set is
/// only ever mutated by decrementing `quantity` after a confirmed purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sweet {
    /// Unique identifier (the server serializes it as `_id`).
    #[serde(rename = "_id")]
    pub id: SweetId,
    /// Display name.
    pub name: String,
    /// Category label, matched exactly when filtering.
    pub category: String,
    /// Unit price. Non-negative.
    pub price: f64,
    /// Remaining stock.
    pub quantity: u32,
    /// Optional product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Optional longer description, searched alongside the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Sweet {
    /// Check if the item is out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// Check if stock is running low.
    pub fn is_low_stock(&self) -> bool {
        self.quantity > 0 && self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Validate a requested purchase quantity against current stock.
    pub fn check_purchase(&self, requested: u32) -> Result<(), DomainError> {
        if requested == 0 {
            return Err(DomainError::InvalidQuantity(requested));
        }
        if requested > self.quantity {
            return Err(DomainError::InsufficientStock {
                requested,
                available: self.quantity,
            });
        }
        Ok(())
    }

    /// Total price for a given quantity.
    pub fn total_for(&self, quantity: u32) -> f64 {
        self.price * quantity as f64
    }
}

/// Payload for creating or updating a catalog item (admin console).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweetInput {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
