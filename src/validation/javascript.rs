//! JavaScript checker
//!
//! Two independent passes: a host compile check reported at the first error
//! position, and a naive per-pair bracket count. The count does not skip
//! strings or comments.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::{SyntaxError, SyntaxValidator};
use crate::validation::engine::{ValidationResult, run_host_validator};

static LINE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+)").expect("Invalid regex pattern"));

const BRACKET_PAIRS: [(char, char); 3] = [('{', '}'), ('(', ')'), ('[', ']')];

pub struct JavaScriptChecker {
    validator: Box<dyn SyntaxValidator + Send + Sync>,
}

impl JavaScriptChecker {
    pub fn new(validator: impl SyntaxValidator + Send + Sync + 'static) -> Self {
        Self {
            validator: Box::new(validator),
        }
    }

    pub fn check(&self, source: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.check_syntax(source, &mut result);
        check_bracket_balance(source, &mut result);
        result
    }

    fn check_syntax(&self, source: &str, result: &mut ValidationResult) {
        let Err(err) = run_host_validator(
            self.validator.as_ref(),
            source,
            "JavaScript syntax check failed",
        ) else {
            return;
        };

        let (line, column) = error_position(&err);
        let offset = offset_of(source, line, column);
        result.add_error(char_span(source, offset), err.message);
    }
}

/// Position of a host error: structured fields first, then a `line:column`
/// found in the message, then the start of the buffer.
fn error_position(err: &SyntaxError) -> (usize, usize) {
    if let (Some(line), Some(column)) = (err.line, err.column) {
        return (line, column);
    }

    LINE_COLUMN
        .captures(&err.message)
        .and_then(|caps| Some((caps[1].parse().ok()?, caps[2].parse().ok()?)))
        .unwrap_or((1, 0))
}

/// Absolute offset of a 1-based line and 0-based column
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let preceding: usize = source
        .split('\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    preceding.saturating_add(column)
}

/// One character at `offset`, clamped into the buffer
fn char_span(source: &str, offset: usize) -> Range<usize> {
    let mut start = offset.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    start..end
}

fn check_bracket_balance(source: &str, result: &mut ValidationResult) {
    for (open, close) in BRACKET_PAIRS {
        let opens = source.matches(open).count();
        let closes = source.matches(close).count();
        if opens == closes {
            continue;
        }

        let excess = if opens > closes { open } else { close };
        if let Some(idx) = source.rfind(excess) {
            result.add_error(idx..idx + 1, format!("Mismatched {} and {}", open, close));
        }
    }
}
