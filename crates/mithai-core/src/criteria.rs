//! Search criteria and the canonical filter predicate.
//!
//! The same criteria value drives both sides of a search: it is serialized
//! into the server's query string and then re-applied locally to whatever
//! the server returns. Keeping one predicate removes any drift between
//! server and client matching semantics (substring vs exact, case
//! sensitivity).

use crate::sweet::Sweet;
use serde::{Deserialize, Serialize};

/// Criteria for a catalog search.
///
/// Transient: rebuilt per query, no stored identity.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchCriteria {
    /// Free-text term, matched case-insensitively as a substring of the
    /// item name or description.
    pub free_text: String,
    /// Exact category match when set.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl SearchCriteria {
    /// Create empty criteria (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick-filter criteria: free text plus category, no price bounds.
    pub fn quick(free_text: impl Into<String>, category: Option<String>) -> Self {
        Self {
            free_text: free_text.into(),
            category,
            min_price: None,
            max_price: None,
        }
    }

    /// Set the free-text term.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = text.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the price bounds.
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Whether any field would narrow a result set.
    pub fn is_active(&self) -> bool {
        !self.free_text.trim().is_empty()
            || self.category.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    /// The canonical predicate: does this item satisfy the criteria?
    ///
    /// Free text is a case-insensitive substring match against name and
    /// description; category is an exact match; price bounds are inclusive.
    pub fn matches(&self, sweet: &Sweet) -> bool {
        let text = self.free_text.trim().to_lowercase();
        if !text.is_empty() {
            let in_name = sweet.name.to_lowercase().contains(&text);
            let in_description = sweet
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&text))
                .unwrap_or(false);
            if !in_name && !in_description {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &sweet.category != category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if sweet.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if sweet.price > max {
                return false;
            }
        }
        true
    }

    /// Filter a slice through the canonical predicate, preserving order.
    pub fn apply<'a>(&self, sweets: impl IntoIterator<Item = &'a Sweet>) -> Vec<Sweet> {
        sweets
            .into_iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect()
    }

    /// Serialize into `(key, value)` pairs for the server's search endpoint.
    ///
    /// Empty fields are omitted so an all-empty criteria produces no query
    /// string at all.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = self.free_text.trim();
        if !text.is_empty() {
            pairs.push(("name", text.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SweetId;

    fn catalog() -> Vec<Sweet> {
        vec![
            Sweet {
                id: SweetId::new("1"),
                name: "Ladoo".to_string(),
                category: "traditional".to_string(),
                price: 10.0,
                quantity: 5,
                image_url: None,
                description: None,
            },
            Sweet {
                id: SweetId::new("2"),
                name: "Kaju Katli".to_string(),
                category: "premium".to_string(),
                price: 45.0,
                quantity: 3,
                image_url: None,
                description: Some("Cashew diamonds".to_string()),
            },
        ]
    }

    #[test]
    fn test_free_text_is_case_insensitive_substring() {
        let sweets = catalog();
        let hits = SearchCriteria::new().with_text("ladoo").apply(&sweets);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ladoo");

        let hits = SearchCriteria::new().with_text("LADOO").apply(&sweets);
        assert_eq!(hits.len(), 1);

        let hits = SearchCriteria::new().with_text("xyz").apply(&sweets);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_free_text_matches_description() {
        let sweets = catalog();
        let hits = SearchCriteria::new().with_text("cashew").apply(&sweets);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Kaju Katli");
    }

    #[test]
    fn test_category_is_exact() {
        let sweets = catalog();
        let hits = SearchCriteria::new().with_category("traditional").apply(&sweets);
        assert_eq!(hits.len(), 1);

        // Case matters for categories, unlike free text.
        let hits = SearchCriteria::new().with_category("Traditional").apply(&sweets);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let sweets = catalog();
        let hits = SearchCriteria::new()
            .with_price_range(Some(10.0), Some(45.0))
            .apply(&sweets);
        assert_eq!(hits.len(), 2);

        let hits = SearchCriteria::new()
            .with_price_range(Some(11.0), None)
            .apply(&sweets);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Kaju Katli");
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = SearchCriteria::new();
        assert!(!criteria.is_active());
        assert_eq!(criteria.apply(&catalog()).len(), 2);
        assert!(criteria.to_query_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs_omit_empty_fields() {
        let pairs = SearchCriteria::quick("ladoo", Some("traditional".to_string()))
            .to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("name", "ladoo".to_string()),
                ("category", "traditional".to_string()),
            ]
        );

        let pairs = SearchCriteria::new()
            .with_price_range(Some(5.0), Some(50.0))
            .to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("min_price", "5".to_string()),
                ("max_price", "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_only_text_is_inactive() {
        let criteria = SearchCriteria::new().with_text("   ");
        assert!(!criteria.is_active());
        assert_eq!(criteria.apply(&catalog()).len(), 2);
    }
}
