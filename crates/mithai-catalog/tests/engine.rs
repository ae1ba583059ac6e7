//! End-to-end tests for the catalog engine against a fake gateway.
//!
//! Time is paused, so debounce windows and simulated network latency
//! resolve deterministically and instantly.

use async_trait::async_trait;
use mithai_catalog::{engine, CatalogError, CatalogHandle, CatalogView};
use mithai_client::{ApiError, CatalogApi, PurchaseApi};
use mithai_core::{
    DomainError, PurchaseId, PurchaseReceipt, PurchaseRecord, SearchCriteria, Sweet, SweetId,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Default)]
struct FakeShop {
    sweets: Mutex<Vec<Sweet>>,
    list_delay: Mutex<Duration>,
    search_delay: Mutex<Duration>,
    fail_list: AtomicBool,
    fail_search: AtomicBool,
    fail_purchase: AtomicBool,
    searches: Mutex<Vec<SearchCriteria>>,
    lists: Mutex<u32>,
    purchases: Mutex<Vec<(SweetId, u32)>>,
}

impl FakeShop {
    fn with(sweets: Vec<Sweet>) -> Arc<Self> {
        Arc::new(Self {
            sweets: Mutex::new(sweets),
            ..Default::default()
        })
    }

    fn searches(&self) -> Vec<SearchCriteria> {
        self.searches.lock().unwrap().clone()
    }

    fn list_count(&self) -> u32 {
        *self.lists.lock().unwrap()
    }

    fn purchases(&self) -> Vec<(SweetId, u32)> {
        self.purchases.lock().unwrap().clone()
    }

    fn set_search_delay(&self, delay: Duration) {
        *self.search_delay.lock().unwrap() = delay;
    }
}

#[async_trait]
impl CatalogApi for FakeShop {
    async fn list_sweets(&self) -> Result<Vec<Sweet>, ApiError> {
        let delay = *self.list_delay.lock().unwrap();
        sleep(delay).await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Request("connection refused".to_string()));
        }
        *self.lists.lock().unwrap() += 1;
        Ok(self.sweets.lock().unwrap().clone())
    }

    async fn search_sweets(&self, criteria: &SearchCriteria) -> Result<Vec<Sweet>, ApiError> {
        let delay = *self.search_delay.lock().unwrap();
        sleep(delay).await;
        self.searches.lock().unwrap().push(criteria.clone());
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(ApiError::Http {
                status: 500,
                message: "Internal Server Error".to_string(),
                server_message: None,
            });
        }
        Ok(criteria.apply(self.sweets.lock().unwrap().iter()))
    }
}

#[async_trait]
impl PurchaseApi for FakeShop {
    async fn purchase(&self, id: &SweetId, quantity: u32) -> Result<PurchaseReceipt, ApiError> {
        if self.fail_purchase.load(Ordering::SeqCst) {
            return Err(ApiError::Http {
                status: 400,
                message: "Bad Request".to_string(),
                server_message: Some("Not enough stock available".to_string()),
            });
        }
        self.purchases.lock().unwrap().push((id.clone(), quantity));
        let total = {
            let sweets = self.sweets.lock().unwrap();
            sweets
                .iter()
                .find(|s| &s.id == id)
                .map(|s| s.total_for(quantity))
                .unwrap_or_default()
        };
        Ok(PurchaseReceipt {
            msg: "Purchase successful".to_string(),
            purchase_id: PurchaseId::new("p1"),
            total,
        })
    }

    async fn purchase_history(&self) -> Result<Vec<PurchaseRecord>, ApiError> {
        Ok(Vec::new())
    }
}

fn sweet(id: &str, name: &str, category: &str, price: f64, quantity: u32) -> Sweet {
    Sweet {
        id: SweetId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price,
        quantity,
        image_url: None,
        description: None,
    }
}

fn catalog() -> Vec<Sweet> {
    vec![
        sweet("1", "Ladoo", "traditional", 10.0, 5),
        sweet("2", "Kaju Katli", "premium", 45.0, 3),
    ]
}

/// Wait until the published view satisfies `pred`, with a generous bound so
/// a broken engine fails the test instead of hanging it.
async fn settle(
    handle: &mut CatalogHandle,
    pred: impl Fn(&CatalogView) -> bool,
) -> CatalogView {
    tokio::time::timeout(Duration::from_secs(60), async {
        let view = handle.view();
        if pred(&view) {
            return view;
        }
        loop {
            let view = handle.changed().await.expect("engine stopped");
            if pred(&view) {
                return view;
            }
        }
    })
    .await
    .expect("view never settled")
}

#[tokio::test(start_paused = true)]
async fn initial_load_populates_the_view() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));

    let view = settle(&mut handle, |v| v.total == 2 && !v.loading).await;
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.categories, vec!["traditional", "premium"]);
    assert_eq!(shop.list_count(), 1);
    assert!(shop.searches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn rapid_text_edits_collapse_into_one_search() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    handle.set_free_text("l").await.unwrap();
    handle.set_free_text("la").await.unwrap();
    handle.set_free_text("ladoo").await.unwrap();

    // Ride past the debounce window and the search round trip.
    sleep(Duration::from_millis(700)).await;
    let view = settle(&mut handle, |v| !v.loading).await;

    let searches = shop.searches();
    assert_eq!(searches.len(), 1, "one search for the whole burst");
    assert_eq!(searches[0].free_text, "ladoo");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].name, "Ladoo");
}

#[tokio::test(start_paused = true)]
async fn free_text_matches_case_insensitively_and_misses_cleanly() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    handle.set_free_text("LADOO").await.unwrap();
    sleep(Duration::from_millis(700)).await;
    let view = settle(&mut handle, |v| !v.loading).await;
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].name, "Ladoo");

    handle.set_free_text("xyz").await.unwrap();
    // The local pass empties the visible list well before the debounced
    // server search can have run.
    let view = tokio::time::timeout(
        Duration::from_millis(100),
        settle(&mut handle, |v| v.items.is_empty()),
    )
    .await
    .expect("local filter should apply instantly");
    assert!(view.items.is_empty());

    // And the server's empty result lands without an error.
    sleep(Duration::from_millis(700)).await;
    let view = settle(&mut handle, |v| !v.loading).await;
    assert!(view.items.is_empty());
    assert_eq!(view.total, 0);
}

#[tokio::test(start_paused = true)]
async fn category_change_searches_without_debounce() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    handle
        .set_category(Some("premium".to_string()))
        .await
        .unwrap();

    // Well inside the 500ms debounce window: a debounced path could not
    // have produced a search yet.
    let view = tokio::time::timeout(
        Duration::from_millis(100),
        settle(&mut handle, |v| !v.loading && v.items.len() == 1),
    )
    .await
    .expect("category search was debounced");
    assert_eq!(view.items[0].name, "Kaju Katli");
    assert_eq!(shop.searches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_category_reverts_to_a_full_fetch() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    handle
        .set_category(Some("premium".to_string()))
        .await
        .unwrap();
    settle(&mut handle, |v| !v.loading && v.items.len() == 1).await;

    handle.set_category(None).await.unwrap();
    let view = settle(&mut handle, |v| !v.loading && v.items.len() == 2).await;
    assert_eq!(view.total, 2);
    assert_eq!(shop.list_count(), 2, "initial load plus the revert");
}

#[tokio::test(start_paused = true)]
async fn advanced_search_replaces_quick_criteria_immediately() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    handle.set_free_text("ladoo").await.unwrap();
    // Before the debounce window closes, an advanced search takes over.
    let criteria = SearchCriteria::new().with_price_range(Some(40.0), Some(50.0));
    handle.advanced_search(criteria.clone()).await.unwrap();

    sleep(Duration::from_millis(700)).await;
    let view = settle(&mut handle, |v| !v.loading).await;

    let searches = shop.searches();
    assert_eq!(searches.len(), 1, "the pending debounced search was cancelled");
    assert_eq!(searches[0], criteria);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].name, "Kaju Katli");
}

#[tokio::test(start_paused = true)]
async fn stale_search_response_cannot_overwrite_a_newer_result() {
    let shop = FakeShop::with(catalog());
    shop.set_search_delay(Duration::from_millis(300));
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    handle.set_free_text("ladoo").await.unwrap();
    // Let the debounce fire so the slow search is on the wire.
    sleep(Duration::from_millis(550)).await;

    // Clearing filters wins even though its response arrives first.
    handle.clear_filters().await.unwrap();
    let view = settle(&mut handle, |v| !v.loading && v.items.len() == 2).await;
    assert_eq!(view.criteria, SearchCriteria::new());

    // The slow search resolves now; its response must be discarded.
    sleep(Duration::from_millis(400)).await;
    let view = handle.view();
    assert_eq!(view.items.len(), 2, "stale response overwrote the list");
    assert_eq!(view.total, 2);
    assert_eq!(shop.searches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn search_failure_falls_back_to_the_full_catalog() {
    let shop = FakeShop::with(catalog());
    shop.fail_search.store(true, Ordering::SeqCst);
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    handle
        .set_category(Some("traditional".to_string()))
        .await
        .unwrap();

    // The failed search silently degrades to a second full fetch; the
    // local pass still narrows the display to the selected category.
    let view = settle(&mut handle, |v| !v.loading && v.total == 2).await;
    assert_eq!(shop.list_count(), 2);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].name, "Ladoo");
}

#[tokio::test(start_paused = true)]
async fn full_fetch_failure_leaves_the_list_stale() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    shop.fail_list.store(true, Ordering::SeqCst);
    handle.refresh().await.unwrap();

    let view = settle(&mut handle, |v| !v.loading).await;
    assert_eq!(view.total, 2, "stale data beats a broken empty screen");
}

#[tokio::test(start_paused = true)]
async fn purchase_decrements_local_quantity_by_exactly_the_amount() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    let receipt = handle.purchase(SweetId::new("1"), 2).await.unwrap();
    assert_eq!(receipt.total, 20.0);
    assert_eq!(shop.purchases(), vec![(SweetId::new("1"), 2)]);

    let view = settle(&mut handle, |v| v.items[0].quantity == 3).await;
    // Only the purchased item changed.
    assert_eq!(view.items[1].quantity, 3);
    assert_eq!(view.items[1].name, "Kaju Katli");
}

#[tokio::test(start_paused = true)]
async fn over_stock_purchase_is_blocked_before_any_request() {
    let shop = FakeShop::with(catalog());
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    let err = handle.purchase(SweetId::new("1"), 6).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Domain(DomainError::InsufficientStock {
            requested: 6,
            available: 5
        })
    ));
    assert!(shop.purchases().is_empty(), "no request should be sent");

    let err = handle.purchase(SweetId::new("1"), 0).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Domain(DomainError::InvalidQuantity(0))
    ));
}

#[tokio::test(start_paused = true)]
async fn failed_purchase_leaves_local_state_unchanged() {
    let shop = FakeShop::with(catalog());
    shop.fail_purchase.store(true, Ordering::SeqCst);
    let mut handle = engine::spawn(Arc::clone(&shop));
    settle(&mut handle, |v| v.total == 2).await;

    let err = handle.purchase(SweetId::new("1"), 2).await.unwrap_err();
    assert_eq!(err.user_message(), "Not enough stock available");

    let view = handle.view();
    assert_eq!(view.items[0].quantity, 5, "no partial decrement");
}
