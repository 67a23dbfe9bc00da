/// Render projection
///
/// Maps the catalog state and the canonical search term to what should be
/// on screen. Exactly one base region is active at a time; the detail
/// overlay is independent of it.

use std::sync::Arc;

use crate::catalog::filter::filter_products;
use crate::state::data::{CatalogState, Product};

/// Why the empty region is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// The catalog itself has no products
    NoProducts,
    /// Products exist but none match the search
    NoMatches,
}

/// The mutually exclusive base regions
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Loading,
    /// Carries the message of the failed fetch
    Error(String),
    Empty(EmptyKind),
    /// Filtered products in fetch order
    Grid(Vec<Arc<Product>>),
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Loading => "loading",
            Region::Error(_) => "error",
            Region::Empty(_) => "empty",
            Region::Grid(_) => "grid",
        }
    }
}

/// One complete picture of the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub region: Region,
    /// Product shown in the detail overlay, if it is open
    pub overlay: Option<Arc<Product>>,
}

/// Something that can show a [`Frame`]
pub trait Surface {
    fn paint(&mut self, frame: &Frame);
}

/// Decide what to show.
///
/// Precedence is loading, then error, then empty (judged after filtering),
/// then grid.
pub fn project(state: &CatalogState, search_term: &str) -> Frame {
    let region = if state.is_loading {
        Region::Loading
    } else if let Some(message) = &state.error {
        Region::Error(message.clone())
    } else {
        let visible = filter_products(&state.products, search_term);
        if !visible.is_empty() {
            Region::Grid(visible)
        } else if state.products.is_empty() {
            Region::Empty(EmptyKind::NoProducts)
        } else {
            Region::Empty(EmptyKind::NoMatches)
        }
    };

    Frame {
        region,
        overlay: state.selected_product.clone(),
    }
}
