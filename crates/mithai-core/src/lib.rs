//! Storefront domain types and logic for Mithai.
//!
//! This crate provides the types shared by the rest of the client:
//!
//! - **Catalog**: sweets with category, price, and remaining stock
//! - **Search**: criteria carrying the canonical filter predicate used for
//!   both server query construction and the local re-filter pass
//! - **Purchases**: receipts and history records

pub mod criteria;
pub mod error;
pub mod ids;
pub mod purchase;
pub mod sweet;

pub use criteria::SearchCriteria;
pub use error::DomainError;
pub use ids::{PurchaseId, SweetId};
pub use purchase::{PurchaseReceipt, PurchaseRecord, SalesSummary};
pub use sweet::{Sweet, SweetInput};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::criteria::SearchCriteria;
    pub use crate::error::DomainError;
    pub use crate::ids::{PurchaseId, SweetId};
    pub use crate::purchase::{PurchaseReceipt, PurchaseRecord, SalesSummary};
    pub use crate::sweet::{Sweet, SweetInput};
}
