//! JavaScript host parser backed by swc.

use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap, Spanned};
use swc_ecma_parser::{EsSyntax, StringInput, Syntax, lexer::Lexer};

use super::{SyntaxError, SyntaxValidator, line_column};

/// Checks a buffer the way a function body would be compiled: as a script
/// in which a top-level `return` is legal.
#[derive(Debug, Clone, Copy)]
pub struct EcmaScriptValidator {
    syntax: Syntax,
}

impl Default for EcmaScriptValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EcmaScriptValidator {
    pub fn new() -> Self {
        Self {
            syntax: Syntax::Es(EsSyntax {
                allow_return_outside_function: true,
                ..Default::default()
            }),
        }
    }
}

impl SyntaxValidator for EcmaScriptValidator {
    fn validate(&self, source: &str) -> Result<(), SyntaxError> {
        let source_map: Lrc<SourceMap> = Default::default();
        let fm = source_map
            .new_source_file(FileName::Custom("input.js".into()).into(), source.to_string());

        let lexer = Lexer::new(
            self.syntax,
            Default::default(),
            StringInput::from(&*fm),
            None,
        );

        let mut parser = swc_ecma_parser::Parser::new_from(lexer);
        let outcome = parser.parse_script();

        // Recovered errors are reported before the fatal one, in source order
        let mut errors = parser.take_errors();
        if let Err(fatal) = outcome {
            errors.push(fatal);
        }

        let Some(first) = errors.into_iter().min_by_key(|e| e.span().lo) else {
            return Ok(());
        };

        let offset = first.span().lo.0.saturating_sub(fm.start_pos.0) as usize;
        let (line, column) = line_column(source, offset);
        let message = format!("{} ({}:{})", first.kind().msg(), line, column);

        log::debug!("swc rejected script at {}:{}: {}", line, column, message);
        Err(SyntaxError::at(message, line, column))
    }
}
