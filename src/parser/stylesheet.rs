//! CSS host parser backed by grass.

use std::path::Path;

use grass::{InputSyntax, Options};

use super::{SyntaxError, SyntaxValidator};

/// File system that contains nothing, so imports never touch disk
#[derive(Debug)]
struct NoFs;

impl grass::Fs for NoFs {
    fn is_dir(&self, _path: &Path) -> bool {
        false
    }

    fn is_file(&self, _path: &Path) -> bool {
        false
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {:?}", path),
        ))
    }
}

/// Parses a buffer as a plain CSS stylesheet
#[derive(Debug, Clone, Copy, Default)]
pub struct StylesheetValidator;

impl StylesheetValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxValidator for StylesheetValidator {
    fn validate(&self, source: &str) -> Result<(), SyntaxError> {
        let options = Options::default()
            .fs(&NoFs)
            .input_syntax(InputSyntax::Css)
            .unicode_error_messages(false);

        match grass::from_string(source, &options) {
            Ok(_) => Ok(()),
            Err(err) => {
                // grass renders a source excerpt below the headline; keep the headline
                let rendered = err.to_string();
                let headline = rendered
                    .lines()
                    .map(str::trim)
                    .find(|line| !line.is_empty())
                    .unwrap_or_default();
                let message = headline.strip_prefix("Error: ").unwrap_or(headline);
                log::debug!("grass rejected stylesheet: {}", message);
                Err(SyntaxError::new(message))
            }
        }
    }
}
