//! Brew Catalog: a native product catalog browser.
//!
//! The selected product and the search term live in a shareable location
//! fragment (`#/7?search=ale`). The [`sync`] controller keeps that fragment,
//! the [`state`] store and the search input in agreement; [`app`] wires it
//! into an iced application.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod route;
pub mod state;
pub mod sync;
pub mod ui;
