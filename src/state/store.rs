use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::data::{CatalogState, Product, ProductId};
use crate::catalog::api::CatalogSource;
use crate::error::FetchError;

type Listener = Box<dyn FnMut(&CatalogState)>;

/// Registered change listeners, shared with the subscription handles
#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// Ids unsubscribed while their listener was out for delivery
    retired: HashSet<u64>,
}

/// Handle returned by [`CatalogStore::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Stop receiving change notifications
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() == before {
            registry.retired.insert(self.id);
        }
    }
}

/// Identifies one fetch request; only the newest ticket may complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Outcome of a selection request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Selection was cleared on request
    Cleared,
    /// The product is now selected
    Selected(ProductId),
    /// The id is not in the current list; selection was cleared
    NotFound(ProductId),
}

/// The CatalogStore owns the fetched products, the load status and the
/// current selection.
///
/// Every mutation notifies all listeners synchronously, even when the new
/// state equals the old one. Consumers do their own change detection.
pub struct CatalogStore {
    state: CatalogState,
    registry: Rc<RefCell<Registry>>,
    /// Ticket number of the newest fetch request
    fetch_generation: u64,
}

impl CatalogStore {
    /// Create an empty store: no products, not loading, no error, no selection
    pub fn new() -> Self {
        Self {
            state: CatalogState::default(),
            registry: Rc::new(RefCell::new(Registry::default())),
            fetch_generation: 0,
        }
    }

    /// Current, fully settled state
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Register a listener invoked after every state mutation
    pub fn subscribe(&self, listener: impl FnMut(&CatalogState) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Fetch the catalog from `source`, performing exactly one request.
    pub async fn fetch_catalog<S: CatalogSource>(&mut self, source: &S) {
        let ticket = self.begin_fetch();
        let result = source.fetch_products().await;
        self.complete_fetch(ticket, result);
    }

    /// Enter the loading state and issue a ticket for the request about to start.
    ///
    /// Products and selection stay as they are until the request completes.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        info!(request = self.fetch_generation, "Fetching catalog");

        self.state.is_loading = true;
        self.state.error = None;
        self.notify();

        FetchTicket(self.fetch_generation)
    }

    /// Apply the result of the request identified by `ticket`.
    ///
    /// Results of superseded requests are dropped. Returns whether the
    /// result was applied.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, FetchError>,
    ) -> bool {
        if ticket.0 != self.fetch_generation {
            warn!(
                request = ticket.0,
                newest = self.fetch_generation,
                "Dropping result of superseded catalog request"
            );
            return false;
        }

        match result {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                self.state.products = products.into_iter().map(Arc::new).collect();
                self.state.error = None;
            }
            Err(err) => {
                error!(error = %err, "Catalog fetch failed");
                self.state.products.clear();
                self.state.error = Some(err.to_string());
            }
        }
        self.state.is_loading = false;

        // Keep the selection pointing into the new list
        self.state.selected_product = self
            .state
            .selected_id()
            .and_then(|id| self.state.find(id).cloned());

        self.notify();
        true
    }

    /// Select a product by id, or clear the selection with `None`.
    ///
    /// Unknown ids clear the selection and report [`Selection::NotFound`];
    /// this is a diagnostic, not a failure.
    pub fn select_product(&mut self, id: Option<ProductId>) -> Selection {
        let outcome = match id {
            None => {
                self.state.selected_product = None;
                Selection::Cleared
            }
            Some(id) => match self.state.find(id).cloned() {
                Some(product) => {
                    self.state.selected_product = Some(product);
                    Selection::Selected(id)
                }
                None => {
                    warn!(product_id = id, "Product with ID {} not found", id);
                    self.state.selected_product = None;
                    Selection::NotFound(id)
                }
            },
        };

        debug!(?outcome, "Selection updated");
        self.notify();
        outcome
    }

    fn notify(&mut self) {
        // Listeners are taken out for delivery so they may subscribe or
        // unsubscribe without re-borrowing the registry
        let mut delivering = std::mem::take(&mut self.registry.borrow_mut().listeners);

        for (_, listener) in delivering.iter_mut() {
            listener(&self.state);
        }

        let mut registry = self.registry.borrow_mut();
        let subscribed_during = std::mem::take(&mut registry.listeners);
        delivering.extend(subscribed_during);

        let retired = std::mem::take(&mut registry.retired);
        delivering.retain(|(id, _)| !retired.contains(id));
        registry.listeners = delivering;
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("state", &self.state)
            .field("fetch_generation", &self.fetch_generation)
            .finish()
    }
}
