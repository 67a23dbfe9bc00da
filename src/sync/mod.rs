/// Synchronization between the location fragment, the catalog store and
/// the search input
///
/// - The single-slot debouncer for search keystrokes (debounce.rs)
/// - The controller reconciling the three sources of truth (controller.rs)

pub mod controller;
pub mod debounce;

pub use controller::{SearchInput, SyncController, SyncState};
pub use debounce::{DebounceTicket, Debouncer};
