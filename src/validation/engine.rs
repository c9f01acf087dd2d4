//! Validation Engine
//!
//! Diagnostic types shared by all checkers and the per-language dispatch.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::parser::{EcmaScriptValidator, StylesheetValidator, SyntaxError, SyntaxValidator};
use crate::validation::css::CssChecker;
use crate::validation::html::HtmlChecker;
use crate::validation::javascript::JavaScriptChecker;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic over a byte range of the checked buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Byte offset of the first code unit covered
    pub start: usize,
    /// Exclusive end offset, `start <= end <= source.len()`
    pub end: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Result of checking a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_error(&mut self, range: Range<usize>, message: String) {
        self.push(range, Severity::Error, message);
    }

    pub fn add_warning(&mut self, range: Range<usize>, message: String) {
        self.push(range, Severity::Warning, message);
    }

    fn push(&mut self, range: Range<usize>, severity: Severity, message: String) {
        debug_assert!(range.start <= range.end);
        self.diagnostics.push(Diagnostic {
            start: range.start,
            end: range.end,
            severity,
            message,
        });
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Languages with a checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Html,
    Css,
}

impl Language {
    /// Resolve an LSP `languageId`
    pub fn from_language_id(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Some(Language::JavaScript),
            "html" => Some(Language::Html),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    /// Resolve from a file name or path by extension
    pub fn from_path(path: &str) -> Option<Self> {
        let (_, ext) = path.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            "html" | "htm" => Some(Language::Html),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Html => "html",
            Language::Css => "css",
        }
    }
}

/// One checker per language
pub struct Checkers {
    pub javascript: JavaScriptChecker,
    pub html: HtmlChecker,
    pub css: CssChecker,
}

impl Default for Checkers {
    fn default() -> Self {
        Self::new(
            JavaScriptChecker::new(EcmaScriptValidator::new()),
            CssChecker::new(StylesheetValidator::new()),
        )
    }
}

impl Checkers {
    pub fn new(javascript: JavaScriptChecker, css: CssChecker) -> Self {
        Self {
            javascript,
            html: HtmlChecker::new(),
            css,
        }
    }
}

/// Check a whole document with the checker for its language
pub fn validate_document(
    content: &str,
    language: Language,
    checkers: &Checkers,
) -> ValidationResult {
    match language {
        Language::JavaScript => checkers.javascript.check(content),
        Language::Html => checkers.html.check(content),
        Language::Css => checkers.css.check(content),
    }
}

/// Run a host validator, turning a panic into a positionless error
pub(crate) fn run_host_validator(
    validator: &dyn SyntaxValidator,
    source: &str,
    fallback_message: &str,
) -> Result<(), SyntaxError> {
    match panic::catch_unwind(AssertUnwindSafe(|| validator.validate(source))) {
        Ok(outcome) => outcome,
        Err(_) => {
            log::warn!("host parser panicked, reporting '{}'", fallback_message);
            Err(SyntaxError::new(fallback_message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept_all(_: &str) -> Result<(), SyntaxError> {
        Ok(())
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.add_warning(0..1, "Test warning".to_string());
        assert!(result.is_valid()); // Warnings don't make it invalid

        result.add_error(2..3, "Test error".to_string());
        assert!(!result.is_valid()); // Errors make it invalid
        assert_eq!(result.diagnostics[1].range(), 2..3);
    }

    #[test]
    fn test_language_from_id_and_path() {
        assert_eq!(Language::from_language_id("JavaScript"), Some(Language::JavaScript));
        assert_eq!(Language::from_language_id("css"), Some(Language::Css));
        assert_eq!(Language::from_language_id("markdown"), None);
        // JSX is not valid in a function body, so it has no checker
        assert_eq!(Language::from_language_id("javascriptreact"), None);

        assert_eq!(Language::from_path("/tmp/index.HTML"), Some(Language::Html));
        assert_eq!(Language::from_path("app.mjs"), Some(Language::JavaScript));
        assert_eq!(Language::from_path("style.css"), Some(Language::Css));
        assert_eq!(Language::from_path("README"), None);
        assert_eq!(Language::from_path("app.jsx"), None);
    }

    #[test]
    fn test_dispatch_by_language() {
        let checkers = Checkers::new(
            JavaScriptChecker::new(accept_all),
            CssChecker::new(accept_all),
        );

        let html = validate_document("<p>", Language::Html, &checkers);
        assert_eq!(html.diagnostics.len(), 1);

        let css = validate_document("<p>", Language::Css, &checkers);
        assert!(css.diagnostics.is_empty());
    }

    #[test]
    fn test_panicking_host_is_contained() {
        let exploding = |_: &str| -> Result<(), SyntaxError> { panic!("parser bug") };
        let outcome = run_host_validator(&exploding, "x", "fallback");
        assert_eq!(outcome, Err(SyntaxError::new("fallback")));
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn test_diagnostic_serializes_for_reports() {
        let mut result = ValidationResult::new();
        result.add_error(3..4, "Unmatched }".to_string());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "diagnostics": [
                    { "start": 3, "end": 4, "severity": "error", "message": "Unmatched }" }
                ]
            })
        );
    }
}
