//! Purchase receipts and history records.

use crate::ids::PurchaseId;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Server acknowledgement of a completed purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseReceipt {
    /// Human-readable confirmation from the server.
    pub msg: String,
    /// Identifier of the recorded purchase.
    pub purchase_id: PurchaseId,
    /// Total charged for the purchase.
    pub total: f64,
}

/// One line of purchase history.
///
/// `user_email` and `user_name` are only present when the server decides the
/// caller may see them (admin accounts get everyone's purchases).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseRecord {
    pub sweet_name: String,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl PurchaseRecord {
    /// Key used when counting distinct purchasers.
    fn purchaser_key(&self) -> Option<&str> {
        self.user_email
            .as_deref()
            .filter(|e| !e.is_empty())
            .or(self.user_name.as_deref())
    }
}

/// Month-bucketed sales aggregates for the admin history view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalesSummary {
    /// Sales total for the calendar month containing `now`.
    pub current_month: f64,
    /// Sales total for the month before that.
    pub previous_month: f64,
    /// Distinct purchasers across all records.
    pub total_purchasers: usize,
}

impl SalesSummary {
    /// Bucket records into current/previous calendar month relative to `now`.
    ///
    /// Records without a timestamp contribute to the purchaser count but to
    /// neither month total.
    pub fn compute(records: &[PurchaseRecord], now: NaiveDateTime) -> Self {
        let current = (now.year(), now.month());
        let previous = if now.month() == 1 {
            (now.year() - 1, 12)
        } else {
            (now.year(), now.month() - 1)
        };

        let mut summary = SalesSummary::default();
        let mut purchasers = HashSet::new();

        for record in records {
            if let Some(key) = record.purchaser_key() {
                purchasers.insert(key.to_string());
            }
            let Some(ts) = record.timestamp else { continue };
            let bucket = (ts.year(), ts.month());
            if bucket == current {
                summary.current_month += record.total;
            } else if bucket == previous {
                summary.previous_month += record.total;
            }
        }

        summary.total_purchasers = purchasers.len();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn record(total: f64, ts: Option<NaiveDateTime>, email: &str) -> PurchaseRecord {
        PurchaseRecord {
            sweet_name: "Ladoo".to_string(),
            quantity: 1,
            price: total,
            total,
            timestamp: ts,
            user_email: Some(email.to_string()),
            user_name: None,
        }
    }

    #[test]
    fn test_month_bucketing() {
        let records = vec![
            record(10.0, Some(at(2026, 8, 1)), "a@x.in"),
            record(20.0, Some(at(2026, 8, 15)), "b@x.in"),
            record(5.0, Some(at(2026, 7, 30)), "a@x.in"),
            record(99.0, Some(at(2026, 1, 2)), "c@x.in"),
        ];
        let summary = SalesSummary::compute(&records, at(2026, 8, 6));
        assert_eq!(summary.current_month, 30.0);
        assert_eq!(summary.previous_month, 5.0);
        assert_eq!(summary.total_purchasers, 3);
    }

    #[test]
    fn test_january_rolls_back_a_year() {
        let records = vec![
            record(7.0, Some(at(2025, 12, 28)), "a@x.in"),
            record(3.0, Some(at(2026, 1, 3)), "a@x.in"),
        ];
        let summary = SalesSummary::compute(&records, at(2026, 1, 10));
        assert_eq!(summary.current_month, 3.0);
        assert_eq!(summary.previous_month, 7.0);
    }

    #[test]
    fn test_missing_timestamp_still_counts_purchaser() {
        let records = vec![record(10.0, None, "a@x.in")];
        let summary = SalesSummary::compute(&records, at(2026, 8, 6));
        assert_eq!(summary.current_month, 0.0);
        assert_eq!(summary.total_purchasers, 1);
    }

    #[test]
    fn test_record_parses_server_timestamp() {
        let json = r#"{
            "sweet_name": "Ladoo",
            "quantity": 2,
            "price": 10.0,
            "total": 20.0,
            "timestamp": "2026-08-06T09:30:00.123456"
        }"#;
        let record: PurchaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp.unwrap().year(), 2026);
        assert_eq!(record.user_email, None);
    }
}
