/// Catalog data access and queries
///
/// - The fetch collaborator and HTTP status messages (api.rs)
/// - The search filter over fetched products (filter.rs)
/// - Bitterness tiers used for styling (ibu.rs)

pub mod api;
pub mod filter;
pub mod ibu;

pub use api::{CatalogSource, HttpCatalog};
pub use ibu::IbuTier;
