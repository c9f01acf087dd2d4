//! CSS checker
//!
//! Host stylesheet parse plus a naive brace count. Both report over the
//! whole buffer and may fire together.

use crate::parser::SyntaxValidator;
use crate::validation::engine::{ValidationResult, run_host_validator};

const GENERIC_MESSAGE: &str = "CSS syntax error";

pub struct CssChecker {
    validator: Box<dyn SyntaxValidator + Send + Sync>,
}

impl CssChecker {
    pub fn new(validator: impl SyntaxValidator + Send + Sync + 'static) -> Self {
        Self {
            validator: Box::new(validator),
        }
    }

    pub fn check(&self, source: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        let whole = 0..source.len();

        if let Err(err) = run_host_validator(self.validator.as_ref(), source, GENERIC_MESSAGE) {
            let message = if err.message.trim().is_empty() {
                GENERIC_MESSAGE.to_string()
            } else {
                err.message
            };
            result.add_error(whole.clone(), message);
        }

        let opens = source.matches('{').count();
        let closes = source.matches('}').count();
        if opens != closes {
            result.add_error(whole, "Mismatched number of { and }".to_string());
        }

        result
    }
}
