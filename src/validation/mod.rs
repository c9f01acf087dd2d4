//! Validation Engine
//!
//! Stateless checkers for JavaScript, HTML and CSS buffers. Each call scans
//! the full text and returns a fresh set of diagnostics.

pub mod css;
pub mod engine;
pub mod html;
pub mod javascript;

pub use css::CssChecker;
pub use engine::{validate_document, Checkers, Diagnostic, Language, Severity};
pub use html::HtmlChecker;
pub use javascript::JavaScriptChecker;

// Re-export common types
pub use engine::ValidationResult;
