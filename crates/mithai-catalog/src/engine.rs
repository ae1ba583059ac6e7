//! The catalog query engine.
//!
//! One task owns the working set and serializes every state update, so no
//! other component ever mutates the list. Inputs arrive as events over a
//! channel; the visible list is published through a watch channel after
//! every change.
//!
//! Reconciliation rules:
//!
//! - free-text edits are debounced for 500ms, then issue one server search
//!   combining the text with the selected category;
//! - category changes act immediately: a server search while any quick
//!   filter is active, a full fetch otherwise;
//! - an advanced search replaces the quick criteria wholesale and queries
//!   at once, without debouncing;
//! - whatever the server returns is re-filtered through the canonical
//!   predicate before display, preserving the server's order;
//! - a failed search silently degrades to an unfiltered full fetch rather
//!   than showing a broken empty screen.
//!
//! Outstanding requests are never cancelled. Instead each carries a
//! generation number and a response older than the latest issued request is
//! discarded, so a slow search can no longer clobber the result of a later
//! "clear filters".

use crate::debounce::Debounce;
use crate::error::CatalogError;
use mithai_client::{ApiError, CatalogApi, PurchaseApi};
use mithai_core::{PurchaseReceipt, SearchCriteria, Sweet, SweetId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, warn};

/// Quiet period before a free-text edit turns into a server search.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Snapshot of catalog state for rendering.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    /// Items passing the canonical predicate, in server order.
    pub items: Vec<Sweet>,
    /// Size of the working set before local filtering.
    pub total: usize,
    /// Distinct categories in the working set, in first-seen order.
    pub categories: Vec<String>,
    /// The criteria currently applied.
    pub criteria: SearchCriteria,
    /// Whether a query is outstanding.
    pub loading: bool,
}

type PurchaseReply = oneshot::Sender<Result<PurchaseReceipt, CatalogError>>;

enum Event {
    SetFreeText(String),
    SetCategory(Option<String>),
    AdvancedSearch(SearchCriteria),
    ClearFilters,
    Refresh,
    Purchase {
        id: SweetId,
        quantity: u32,
        reply: PurchaseReply,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind {
    Full,
    Search,
}

enum Outcome {
    Query {
        generation: u64,
        kind: QueryKind,
        result: Result<Vec<Sweet>, ApiError>,
    },
    Purchase {
        id: SweetId,
        quantity: u32,
        result: Result<PurchaseReceipt, ApiError>,
        reply: PurchaseReply,
    },
}

/// Handle for driving a spawned engine.
#[derive(Clone)]
pub struct CatalogHandle {
    events: mpsc::Sender<Event>,
    view: watch::Receiver<CatalogView>,
}

impl CatalogHandle {
    /// Update the free-text filter. Debounced server-side, instant locally.
    pub async fn set_free_text(&self, text: impl Into<String>) -> Result<(), CatalogError> {
        self.send(Event::SetFreeText(text.into())).await
    }

    /// Select a category, `None` meaning "all". Takes effect immediately.
    pub async fn set_category(&self, category: Option<String>) -> Result<(), CatalogError> {
        self.send(Event::SetCategory(category)).await
    }

    /// Run an advanced search, replacing the quick filter's criteria.
    pub async fn advanced_search(&self, criteria: SearchCriteria) -> Result<(), CatalogError> {
        self.send(Event::AdvancedSearch(criteria)).await
    }

    /// Reset all filters and reload the full catalog.
    pub async fn clear_filters(&self) -> Result<(), CatalogError> {
        self.send(Event::ClearFilters).await
    }

    /// Reload the full catalog without touching the filters.
    pub async fn refresh(&self) -> Result<(), CatalogError> {
        self.send(Event::Refresh).await
    }

    /// Buy `quantity` units of an item.
    ///
    /// Bounds are checked against the working set before any request goes
    /// out; on success the local quantity is decremented by exactly the
    /// purchased amount and the server's receipt is returned. On failure
    /// nothing is mutated and the error carries the server's message.
    pub async fn purchase(
        &self,
        id: SweetId,
        quantity: u32,
    ) -> Result<PurchaseReceipt, CatalogError> {
        let (reply, response) = oneshot::channel();
        self.send(Event::Purchase {
            id,
            quantity,
            reply,
        })
        .await?;
        response.await.map_err(|_| CatalogError::EngineClosed)?
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> CatalogView {
        self.view.borrow().clone()
    }

    /// Wait for the next published view.
    pub async fn changed(&mut self) -> Result<CatalogView, CatalogError> {
        self.view
            .changed()
            .await
            .map_err(|_| CatalogError::EngineClosed)?;
        Ok(self.view.borrow_and_update().clone())
    }

    async fn send(&self, event: Event) -> Result<(), CatalogError> {
        self.events
            .send(event)
            .await
            .map_err(|_| CatalogError::EngineClosed)
    }
}

/// Spawn the engine over a gateway and return its handle.
///
/// The engine fetches the full catalog on startup and runs until every
/// handle has been dropped.
pub fn spawn<G>(gateway: Arc<G>) -> CatalogHandle
where
    G: CatalogApi + PurchaseApi + Send + Sync + 'static,
{
    let (events_tx, events_rx) = mpsc::channel(32);
    let (outcomes_tx, outcomes_rx) = mpsc::channel(32);
    let (view_tx, view_rx) = watch::channel(CatalogView::default());

    let engine = Engine {
        gateway,
        events: events_rx,
        outcomes_tx,
        outcomes: outcomes_rx,
        view: view_tx,
        working: Vec::new(),
        criteria: SearchCriteria::new(),
        debounce: Debounce::new(DEBOUNCE_DELAY),
        issued: 0,
        applied: 0,
    };
    tokio::spawn(engine.run());

    CatalogHandle {
        events: events_tx,
        view: view_rx,
    }
}

struct Engine<G> {
    gateway: Arc<G>,
    events: mpsc::Receiver<Event>,
    outcomes_tx: mpsc::Sender<Outcome>,
    outcomes: mpsc::Receiver<Outcome>,
    view: watch::Sender<CatalogView>,
    /// Last applied server result, unfiltered.
    working: Vec<Sweet>,
    criteria: SearchCriteria,
    debounce: Debounce,
    /// Generation of the most recently issued query.
    issued: u64,
    /// Generation of the most recently resolved current query.
    applied: u64,
}

impl<G> Engine<G>
where
    G: CatalogApi + PurchaseApi + Send + Sync + 'static,
{
    async fn run(mut self) {
        self.issue_query(QueryKind::Full);
        self.publish();

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                _ = self.debounce.fired(), if self.debounce.is_armed() => {
                    self.on_debounce_fired();
                }
                Some(outcome) = self.outcomes.recv() => {
                    self.on_outcome(outcome);
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::SetFreeText(text) => {
                self.criteria = SearchCriteria::quick(text, self.criteria.category.take());
                if self.criteria.free_text.trim().is_empty() {
                    self.debounce.cancel();
                } else {
                    self.debounce.arm();
                }
                self.publish();
            }
            Event::SetCategory(category) => {
                let text = std::mem::take(&mut self.criteria.free_text);
                self.criteria = SearchCriteria::quick(text, category);
                if self.criteria.is_active() {
                    self.issue_query(QueryKind::Search);
                } else {
                    self.issue_query(QueryKind::Full);
                }
                self.publish();
            }
            Event::AdvancedSearch(criteria) => {
                self.criteria = criteria;
                self.debounce.cancel();
                self.issue_query(QueryKind::Search);
                self.publish();
            }
            Event::ClearFilters => {
                self.criteria = SearchCriteria::new();
                self.debounce.cancel();
                self.issue_query(QueryKind::Full);
                self.publish();
            }
            Event::Refresh => {
                self.issue_query(QueryKind::Full);
                self.publish();
            }
            Event::Purchase {
                id,
                quantity,
                reply,
            } => self.submit_purchase(id, quantity, reply),
        }
    }

    fn on_debounce_fired(&mut self) {
        if self.criteria.free_text.trim().is_empty() {
            return;
        }
        self.issue_query(QueryKind::Search);
        self.publish();
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Query {
                generation,
                kind,
                result,
            } => {
                if generation != self.issued {
                    debug!(generation, latest = self.issued, "discarding stale response");
                    return;
                }
                self.applied = generation;
                match (kind, result) {
                    (_, Ok(items)) => {
                        self.working = items;
                        self.publish();
                    }
                    (QueryKind::Search, Err(e)) => {
                        warn!(error = %e, "search failed, falling back to full catalog");
                        self.issue_query(QueryKind::Full);
                        self.publish();
                    }
                    (QueryKind::Full, Err(e)) => {
                        error!(error = %e, "failed to fetch catalog");
                        self.publish();
                    }
                }
            }
            Outcome::Purchase {
                id,
                quantity,
                result,
                reply,
            } => {
                let result = result.map_err(CatalogError::Api);
                if result.is_ok() {
                    if let Some(item) = self.working.iter_mut().find(|s| s.id == id) {
                        item.quantity = item.quantity.saturating_sub(quantity);
                    }
                    self.publish();
                }
                let _ = reply.send(result);
            }
        }
    }

    fn submit_purchase(&mut self, id: SweetId, quantity: u32, reply: PurchaseReply) {
        let Some(item) = self.working.iter().find(|s| s.id == id) else {
            let _ = reply.send(Err(
                mithai_core::DomainError::UnknownItem(id.to_string()).into()
            ));
            return;
        };
        if let Err(e) = item.check_purchase(quantity) {
            let _ = reply.send(Err(e.into()));
            return;
        }

        let gateway = Arc::clone(&self.gateway);
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = gateway.purchase(&id, quantity).await;
            let _ = outcomes
                .send(Outcome::Purchase {
                    id,
                    quantity,
                    result,
                    reply,
                })
                .await;
        });
    }

    /// Issue a server query tagged with the next generation.
    fn issue_query(&mut self, kind: QueryKind) {
        self.issued += 1;
        let generation = self.issued;
        let criteria = self.criteria.clone();
        let gateway = Arc::clone(&self.gateway);
        let outcomes = self.outcomes_tx.clone();

        tokio::spawn(async move {
            let result = match kind {
                QueryKind::Full => gateway.list_sweets().await,
                QueryKind::Search => gateway.search_sweets(&criteria).await,
            };
            let _ = outcomes
                .send(Outcome::Query {
                    generation,
                    kind,
                    result,
                })
                .await;
        });
    }

    fn publish(&self) {
        let items = self.criteria.apply(&self.working);
        let mut categories = Vec::new();
        for sweet in &self.working {
            if !categories.contains(&sweet.category) {
                categories.push(sweet.category.clone());
            }
        }
        self.view.send_replace(CatalogView {
            items,
            total: self.working.len(),
            categories,
            criteria: self.criteria.clone(),
            loading: self.issued > self.applied,
        });
    }
}
