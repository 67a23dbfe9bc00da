/// Synchronization controller
///
/// Three sources of truth have to agree: the location fragment, the catalog
/// store and the search input. The controller owns the canonical search
/// term and reacts to five events:
///
/// 1. fragment changed: adopt the fragment's search term, then resolve its
///    product id. Never writes the fragment back.
/// 2. search committed (after the debounce window): adopt the term and
///    replace the fragment, keeping the selected id.
/// 3. product activated: push a fragment naming the product; selection
///    happens when that fragment's change event arrives.
/// 4. overlay closed: push a fragment without an id, or clear the selection
///    directly when the fragment names none.
/// 5. catalog loaded: resolve a product id that arrived before the products.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use super::debounce::{DebounceTicket, Debouncer};
use crate::catalog::api::CatalogSource;
use crate::error::FetchError;
use crate::route::fragment;
use crate::route::history::Navigator;
use crate::state::data::{CatalogState, Product, ProductId};
use crate::state::store::{CatalogStore, FetchTicket, Subscription};
use crate::ui::projector::{project, Surface};

/// The text control holding the user's search
pub trait SearchInput {
    /// Currently displayed text
    fn value(&self) -> &str;

    /// Overwrite the displayed text
    fn set_value(&mut self, value: &str);
}

/// Controller-owned synchronization state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    /// The authoritative, trimmed search term
    pub canonical_search_term: String,
    /// Product id named by the fragment before the catalog arrived
    pub pending_selection_id: Option<ProductId>,
}

/// Paints frames for store notifications and search changes
struct Painter<S> {
    surface: S,
    search_term: String,
}

impl<S: Surface> Painter<S> {
    fn repaint(&mut self, state: &CatalogState) {
        let frame = project(state, &self.search_term);
        debug!(region = frame.region.name(), overlay = frame.overlay.is_some(), "Render");
        self.surface.paint(&frame);
    }
}

/// History semantics of a fragment write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Push,
    Replace,
}

/// Reconciles fragment, store and search input.
pub struct SyncController<N, I, S> {
    store: CatalogStore,
    navigator: N,
    input: I,
    painter: Rc<RefCell<Painter<S>>>,
    sync: SyncState,
    debouncer: Debouncer<String>,
    _store_subscription: Subscription,
}

impl<N, I, S> SyncController<N, I, S>
where
    N: Navigator,
    I: SearchInput,
    S: Surface + 'static,
{
    /// Wire the controller to its collaborators and subscribe rendering to the store
    pub fn new(
        store: CatalogStore,
        navigator: N,
        input: I,
        surface: S,
        debounce_window: Duration,
    ) -> Self {
        let painter = Rc::new(RefCell::new(Painter {
            surface,
            search_term: String::new(),
        }));

        let listener_painter = Rc::clone(&painter);
        let store_subscription =
            store.subscribe(move |state| listener_painter.borrow_mut().repaint(state));

        Self {
            store,
            navigator,
            input,
            painter,
            sync: SyncState::default(),
            debouncer: Debouncer::new(debounce_window),
            _store_subscription: store_subscription,
        }
    }

    /// Sync with the initial fragment, then start the one startup fetch.
    pub fn start(&mut self) -> FetchTicket {
        info!(fragment = %self.navigator.current(), "Starting catalog session");
        self.on_fragment_changed();
        self.store.begin_fetch()
    }

    /// Start an explicit refetch (the retry path after a failure)
    pub fn refetch(&mut self) -> FetchTicket {
        self.store.begin_fetch()
    }

    /// Run the startup sequence against `source` to completion.
    pub async fn run<C: CatalogSource>(&mut self, source: &C) {
        let ticket = self.start();
        let result = source.fetch_products().await;
        self.on_catalog_loaded(ticket, result);
    }

    /// Event 1: the fragment changed (navigation, history write or synthetic event).
    ///
    /// Search is reconciled before selection so the input reflects the
    /// location before anything renders. Nothing here writes the fragment.
    pub fn on_fragment_changed(&mut self) {
        let intent = fragment::decode(self.navigator.current());
        debug!(?intent, "Fragment changed");

        let incoming = intent.search_or_empty().trim();
        if incoming != self.sync.canonical_search_term {
            // A keystroke still waiting would undo what the location just said
            if self.debouncer.cancel().is_some() {
                debug!("Cancelled pending search in favour of the fragment");
            }
            if self.input.value() != incoming {
                self.input.set_value(incoming);
            }
            self.adopt_search_term(incoming.to_string());
            self.render();
        }

        match intent.product_id {
            None => {
                self.sync.pending_selection_id = None;
                self.store.select_product(None);
            }
            Some(id) if self.store.state().is_populated() => {
                self.sync.pending_selection_id = None;
                self.store.select_product(Some(id));
            }
            Some(id) => {
                debug!(product_id = id, "Catalog not loaded yet; selection pending");
                self.sync.pending_selection_id = Some(id);
            }
        }
    }

    /// A keystroke in the search input; schedules a debounced commit.
    ///
    /// The caller arms a timer for [`Self::debounce_window`] and passes the
    /// ticket to [`Self::on_search_settled`] when it elapses.
    pub fn on_search_input(&mut self, raw: &str) -> DebounceTicket {
        self.debouncer.schedule(raw.to_string())
    }

    /// The debounce timer for `ticket` elapsed
    pub fn on_search_settled(&mut self, ticket: DebounceTicket) {
        if let Some(raw) = self.debouncer.fire(ticket) {
            self.on_search_committed(&raw);
        }
    }

    /// Event 2: a search term survived the quiescence window.
    ///
    /// The input keeps exactly what the user typed; only the canonical term
    /// and the fragment carry the trimmed form.
    pub fn on_search_committed(&mut self, raw: &str) {
        let normalized = raw.trim();
        if normalized == self.sync.canonical_search_term {
            return;
        }

        self.adopt_search_term(normalized.to_string());

        let id = self
            .store
            .state()
            .selected_id()
            .or(self.sync.pending_selection_id);
        self.write_fragment(id, WriteMode::Replace);

        self.render();
    }

    /// Event 3: the user activated a product card.
    pub fn on_product_activated(&mut self, id: ProductId) {
        debug!(product_id = id, "Product activated");
        self.write_fragment(Some(id), WriteMode::Push);
    }

    /// Event 4: the user closed the detail overlay.
    pub fn on_overlay_closed(&mut self) {
        let intent = fragment::decode(self.navigator.current());
        if intent.product_id.is_some() {
            self.write_fragment(None, WriteMode::Push);
        } else {
            self.store.select_product(None);
        }
    }

    /// Event 5: a catalog request finished.
    pub fn on_catalog_loaded(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, FetchError>,
    ) {
        if !self.store.complete_fetch(ticket, result) {
            return;
        }

        if let Some(id) = self.sync.pending_selection_id.take() {
            debug!(product_id = id, "Resolving pending selection");
            self.store.select_product(Some(id));
        }
    }

    /// Deliver queued fragment-changed events until the location is quiet.
    ///
    /// Returns the number of events delivered.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while self.navigator.take_change() {
            self.on_fragment_changed();
            delivered += 1;
        }
        delivered
    }

    pub fn debounce_window(&self) -> Duration {
        self.debouncer.window()
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    pub fn catalog(&self) -> &CatalogState {
        self.store.state()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Mutable access for the shell to mirror what the user typed
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.painter.borrow(), |painter| &painter.surface)
    }

    fn adopt_search_term(&mut self, term: String) {
        debug!(from = %self.sync.canonical_search_term, to = %term, "Search term adopted");

        self.painter.borrow_mut().search_term = term.clone();
        self.sync.canonical_search_term = term;
    }

    fn write_fragment(&mut self, id: Option<ProductId>, mode: WriteMode) {
        let next = fragment::encode(id, Some(&self.sync.canonical_search_term));

        match mode {
            WriteMode::Replace if next == self.navigator.current() => {
                debug!(fragment = %next, "Fragment already current; skipping replace");
            }
            WriteMode::Replace => {
                debug!(fragment = %next, "Replacing fragment");
                self.navigator.replace(next);
            }
            WriteMode::Push => {
                debug!(fragment = %next, "Pushing fragment");
                self.navigator.push(next);
            }
        }
    }

    fn render(&mut self) {
        self.painter.borrow_mut().repaint(self.store.state());
    }
}
