//! Web Lint Language Server
//!
//! Cheap, best-effort syntax diagnostics for JavaScript, HTML and CSS
//! buffers, recomputed on every edit.
//!
//! This library provides:
//! - Three stateless checkers producing byte-offset diagnostics
//! - Host parser adapters (swc for JavaScript, grass for CSS)
//! - A static catalog of CSS/JS frameworks served from CDNs
//! - An LSP front-end publishing the diagnostics

pub mod check;
pub mod config;
pub mod frameworks;
pub mod lsp;
pub mod parser;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use frameworks::Framework;
pub use parser::{SyntaxError, SyntaxValidator};
pub use validation::{validate_document, Checkers, Diagnostic, Language, Severity};
