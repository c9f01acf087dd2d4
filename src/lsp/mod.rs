//! LSP Protocol Implementation
//!
//! Thin host around the checkers: stores open documents and publishes their
//! diagnostics on every change.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
