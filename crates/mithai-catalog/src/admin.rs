//! Admin inventory console.

use mithai_client::{CatalogApi, InventoryApi};
use mithai_core::{SearchCriteria, Sweet, SweetId, SweetInput};
use std::sync::Arc;
use tracing::error;

/// Inventory form state: raw input strings, parsed only on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub image_url: String,
}

impl SweetForm {
    /// Parse into a request payload, with field-level messages for the
    /// inline error display.
    pub fn parse(&self) -> Result<SweetInput, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err("Category is required".to_string());
        }
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number".to_string())?;
        if price < 0.0 {
            return Err("Price must not be negative".to_string());
        }
        let quantity: u32 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| "Quantity must be a whole number".to_string())?;
        let image_url = self.image_url.trim();

        Ok(SweetInput {
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity,
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
        })
    }

    fn clear(&mut self) {
        *self = SweetForm::default();
    }

    fn fill_from(&mut self, sweet: &Sweet) {
        self.name = sweet.name.clone();
        self.category = sweet.category.clone();
        self.price = sweet.price.to_string();
        self.quantity = sweet.quantity.to_string();
        self.image_url = sweet.image_url.clone().unwrap_or_default();
    }
}

/// State for the admin inventory view: the sweet list, the add/edit form,
/// and a local search filter over the list.
///
/// Every successful mutation re-fetches the list rather than patching it
/// locally; the admin view always reflects the server.
pub struct InventoryConsole<G> {
    gateway: Arc<G>,
    sweets: Vec<Sweet>,
    pub form: SweetForm,
    editing: Option<SweetId>,
    search_term: String,
    category_filter: Option<String>,
    /// Inline error message, cleared on the next action.
    pub error: Option<String>,
    /// Inline success message.
    pub notice: Option<String>,
}

impl<G> InventoryConsole<G>
where
    G: CatalogApi + InventoryApi,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            sweets: Vec::new(),
            form: SweetForm::default(),
            editing: None,
            search_term: String::new(),
            category_filter: None,
            error: None,
            notice: None,
        }
    }

    /// Reload the list from the server.
    pub async fn refresh(&mut self) {
        match self.gateway.list_sweets().await {
            Ok(sweets) => self.sweets = sweets,
            Err(e) => {
                error!(error = %e, "failed to fetch sweets");
                self.error = Some("Failed to fetch sweets".to_string());
            }
        }
    }

    /// Create or update depending on whether an edit is in progress.
    pub async fn submit(&mut self) {
        self.error = None;
        self.notice = None;

        let input = match self.form.parse() {
            Ok(input) => input,
            Err(message) => {
                self.error = Some(message);
                return;
            }
        };

        let outcome = match &self.editing {
            Some(id) => self.gateway.update_sweet(id, &input).await,
            None => self.gateway.create_sweet(&input).await,
        };

        match outcome {
            Ok(()) => {
                self.notice = Some(if self.editing.is_some() {
                    "Sweet updated successfully!".to_string()
                } else {
                    "Sweet added successfully!".to_string()
                });
                self.editing = None;
                self.form.clear();
                self.refresh().await;
            }
            Err(e) => {
                self.error = Some(e.user_message().to_string());
            }
        }
    }

    /// Load an item into the form for editing.
    pub fn edit(&mut self, id: &SweetId) {
        if let Some(sweet) = self.sweets.iter().find(|s| &s.id == id) {
            self.form.fill_from(sweet);
            self.editing = Some(id.clone());
        }
    }

    /// Abandon the current edit and clear the form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.clear();
    }

    /// Whether the form is editing an existing item.
    pub fn editing(&self) -> Option<&SweetId> {
        self.editing.as_ref()
    }

    /// Delete an item and reload.
    pub async fn delete(&mut self, id: &SweetId) {
        self.error = None;
        match self.gateway.delete_sweet(id).await {
            Ok(()) => {
                self.notice = Some("Sweet deleted successfully!".to_string());
                self.refresh().await;
            }
            Err(e) => {
                self.error = Some(e.user_message().to_string());
            }
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.category_filter = category;
    }

    /// The full list as last fetched.
    pub fn sweets(&self) -> &[Sweet] {
        &self.sweets
    }

    /// The list narrowed by the local search term and category filter.
    pub fn visible(&self) -> Vec<&Sweet> {
        let criteria =
            SearchCriteria::quick(self.search_term.clone(), self.category_filter.clone());
        self.sweets.iter().filter(|s| criteria.matches(s)).collect()
    }

    /// Distinct categories in the list, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = Vec::new();
        for sweet in &self.sweets {
            if !categories.contains(&sweet.category) {
                categories.push(sweet.category.clone());
            }
        }
        categories
    }
}
