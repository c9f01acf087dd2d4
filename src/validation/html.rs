//! HTML checker
//!
//! A single left-to-right scan over tag tokens with a stack of open tags.
//! There is no resynchronization: a mismatched closing tag leaves the stack
//! untouched, so one misnesting can surface as several unclosed-tag warnings.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::engine::ValidationResult;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?([a-zA-Z0-9]+)(\s[^>]*)?>").expect("Invalid regex pattern")
});

/// Elements that never take a closing tag
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// An open tag waiting for its closing tag
#[derive(Debug, Clone, PartialEq, Eq)]
struct TagFrame {
    /// Lowercased tag name
    name: String,
    /// Offset of the `<` of the opening tag
    start: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlChecker;

impl HtmlChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, source: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut stack: Vec<TagFrame> = Vec::new();

        for caps in TAG.captures_iter(source) {
            let (Some(full), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str().to_ascii_lowercase();

            if !full.as_str().starts_with("</") {
                if !is_void_element(&name) {
                    stack.push(TagFrame {
                        name,
                        start: full.start(),
                    });
                }
                continue;
            }

            if stack.last().is_some_and(|top| top.name == name) {
                stack.pop();
            } else {
                result.add_error(
                    full.range(),
                    format!("Mismatched closing tag </{}>", name),
                );
            }
        }

        for unclosed in stack {
            result.add_warning(
                unclosed.start..unclosed.start + unclosed.name.len() + 1,
                format!("Unclosed tag <{}>", unclosed.name),
            );
        }

        result
    }
}

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
