/// Location handling
///
/// This module owns everything about the shareable location fragment:
/// - Encoding and decoding navigation intents (fragment.rs)
/// - The in-app navigation history with push/replace semantics (history.rs)

pub mod fragment;
pub mod history;

pub use history::{History, Navigator};
