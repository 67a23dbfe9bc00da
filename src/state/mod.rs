/// State management module
///
/// This module handles all catalog state, including:
/// - Shared data structures (data.rs)
/// - The catalog store with change notifications (store.rs)

pub mod data;
pub mod store;

pub use data::{CatalogState, Product, ProductId};
pub use store::{CatalogStore, FetchTicket, Selection, Subscription};
