/// Shared data structures for the catalog state
///
/// These structs represent the data model that flows between
/// the catalog endpoint, the store and the UI layer.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

/// Stable identity of a product across fetches
pub type ProductId = u64;

/// Represents a single product in the catalog
///
/// Immutable once fetched; the store hands out shared references to it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Unique catalog ID
    pub id: ProductId,
    /// Display name (e.g., "Pale Ale")
    pub name: String,
    /// Long-form description shown in the detail overlay
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Remote image location
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    /// Alcohol by volume, in percent
    #[serde(default, deserialize_with = "null_as_default")]
    pub abv: f64,
    /// International bitterness units
    #[serde(default, deserialize_with = "null_as_default")]
    pub ibu: f64,
}

/// The endpoint sends `null` for unknown values; treat them like missing fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Everything the store knows about the catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Products in fetch order
    pub products: Vec<Arc<Product>>,
    /// A fetch is in flight
    pub is_loading: bool,
    /// Human-readable message of the last failed fetch
    pub error: Option<String>,
    /// Always one of the `Arc`s in `products` when set
    pub selected_product: Option<Arc<Product>>,
}

impl CatalogState {
    /// Look up a product by id in the current list
    pub fn find(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| product.id == id)
    }

    /// True once a fetch has delivered at least one product
    pub fn is_populated(&self) -> bool {
        !self.products.is_empty()
    }

    /// Id of the selected product, if any
    pub fn selected_id(&self) -> Option<ProductId> {
        self.selected_product.as_ref().map(|product| product.id)
    }
}
