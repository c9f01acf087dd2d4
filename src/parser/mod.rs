//! Host Parsers
//!
//! The checkers never parse JavaScript or CSS themselves. They hand the
//! buffer to a [`SyntaxValidator`], which answers "valid" or "first error".
//! Concrete validators wrap swc (JavaScript) and grass (CSS); tests inject
//! closures instead.

pub mod ecmascript;
pub mod stylesheet;

pub use ecmascript::EcmaScriptValidator;
pub use stylesheet::StylesheetValidator;

/// First syntax error reported by a host parser
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    /// 1-based line of the error, when the host knows it
    pub line: Option<usize>,
    /// 0-based column within `line`
    pub column: Option<usize>,
}

impl SyntaxError {
    /// An error carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    /// An error with a known position
    pub fn at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }
}

/// Host capability: check a whole buffer and report the first error
pub trait SyntaxValidator {
    fn validate(&self, source: &str) -> Result<(), SyntaxError>;
}

impl<F> SyntaxValidator for F
where
    F: Fn(&str) -> Result<(), SyntaxError>,
{
    fn validate(&self, source: &str) -> Result<(), SyntaxError> {
        self(source)
    }
}

/// Convert a byte offset into a 1-based line and 0-based byte column
pub(crate) fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |idx| idx + 1);
    (line, offset - line_start)
}
