//! Purchase history view.

use chrono::NaiveDateTime;
use mithai_client::PurchaseApi;
use mithai_core::{PurchaseRecord, SalesSummary};
use tracing::error;

/// Aggregates over the filtered history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistoryTotals {
    /// Number of purchases shown.
    pub purchases: usize,
    /// Sum of their totals.
    pub amount: f64,
    /// Sum of their quantities.
    pub items: u32,
}

/// Purchase history with a local text filter.
///
/// The server decides whose purchases come back: regular accounts see their
/// own, admins see everyone's with purchaser fields attached.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    records: Vec<PurchaseRecord>,
    filter: String,
}

impl HistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch history from the server. A failed fetch logs diagnostics and
    /// leaves the view empty rather than raising a blocking error.
    pub async fn load<G: PurchaseApi>(gateway: &G) -> Self {
        match gateway.purchase_history().await {
            Ok(records) => Self {
                records,
                filter: String::new(),
            },
            Err(e) => {
                error!(error = %e, "failed to load purchase history");
                Self::new()
            }
        }
    }

    /// Replace the records (for tests and manual refresh flows).
    pub fn with_records(records: Vec<PurchaseRecord>) -> Self {
        Self {
            records,
            filter: String::new(),
        }
    }

    /// Set the local filter term.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// All records as returned by the server.
    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    /// Records matching the filter, case-insensitively, against the sweet
    /// name, purchaser email, and purchaser name.
    pub fn filtered(&self) -> Vec<&PurchaseRecord> {
        let needle = self.filter.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                if needle.is_empty() {
                    return true;
                }
                record.sweet_name.to_lowercase().contains(&needle)
                    || record
                        .user_email
                        .as_deref()
                        .map(|e| e.to_lowercase().contains(&needle))
                        .unwrap_or(false)
                    || record
                        .user_name
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Aggregates over the filtered view.
    pub fn totals(&self) -> HistoryTotals {
        let mut totals = HistoryTotals::default();
        for record in self.filtered() {
            totals.purchases += 1;
            totals.amount += record.total;
            totals.items += record.quantity;
        }
        totals
    }

    /// Month-bucketed sales aggregates over the unfiltered records.
    pub fn sales_summary(&self, now: NaiveDateTime) -> SalesSummary {
        SalesSummary::compute(&self.records, now)
    }
}
