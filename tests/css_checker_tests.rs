//! CSS checker behaviour with fake and real host parsers
use weblint_language_server::parser::StylesheetValidator;
use weblint_language_server::validation::CssChecker;
use weblint_language_server::{Severity, SyntaxError};

fn reject_with_message(_: &str) -> Result<(), SyntaxError> {
    Err(SyntaxError::new("Unexpected token"))
}

fn accept_all(_: &str) -> Result<(), SyntaxError> {
    Ok(())
}

#[test]
fn test_host_error_spans_whole_buffer() {
    let source = "a { color: }";
    let result = CssChecker::new(reject_with_message).check(source);

    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.range(), 0..source.len());
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.message, "Unexpected token");
}

#[test]
fn test_both_diagnostics_fire_together() {
    let result = CssChecker::new(reject_with_message).check("a {");
    let messages: Vec<&str> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["Unexpected token", "Mismatched number of { and }"]);
}

#[test]
fn test_braces_in_strings_are_counted() {
    let result = CssChecker::new(accept_all).check("a::before { content: \"}\"; }");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].message, "Mismatched number of { and }");
}

#[test]
fn test_panicking_host_uses_generic_message() {
    let checker = CssChecker::new(|_: &str| -> Result<(), SyntaxError> { panic!("boom") });
    let result = checker.check("a {}");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].message, "CSS syntax error");
}

#[test]
fn test_grass_valid_rule() {
    let checker = CssChecker::new(StylesheetValidator::new());
    assert!(checker.check("a { color: red; }").diagnostics.is_empty());
}

#[test]
fn test_grass_unclosed_rule() {
    let checker = CssChecker::new(StylesheetValidator::new());
    let result = checker.check("a { color: red;");

    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.message == "Mismatched number of { and }")
    );
    assert!(result.diagnostics.iter().all(|d| d.range() == (0..15)));
}

#[test]
fn test_grass_empty_stylesheet() {
    let checker = CssChecker::new(StylesheetValidator::new());
    assert!(checker.check("").diagnostics.is_empty());
}
