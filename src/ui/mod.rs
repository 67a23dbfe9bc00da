/// User interface module
///
/// - Mapping catalog state to visible regions (projector.rs)
/// - The iced-side collaborators of the controller (shell.rs)
/// - Product images fetched for cards and the overlay (images.rs)
/// - The order menu shown in the detail overlay (order_menu.rs)
/// - Widget construction (view.rs)

pub mod images;
pub mod order_menu;
pub mod projector;
pub mod shell;
pub mod view;
