use tower_lsp::lsp_types::Position;

use crate::validation::Language;

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// `None` for documents no checker understands
    pub language: Option<Language>,
    pub line_index: LineIndex,
}

impl DocumentState {
    pub fn new(content: String, language: Option<Language>) -> Self {
        let line_index = LineIndex::new(&content);
        Self {
            content,
            language,
            line_index,
        }
    }

    /// LSP position (UTF-16 column) of a byte offset into `content`
    pub fn position(&self, offset: usize) -> Position {
        self.line_index.position(&self.content, offset)
    }
}

/// Byte offsets of line starts, for offset to position conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    pub fn position(&self, text: &str, offset: usize) -> Position {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let character = text[line_start..offset].encode_utf16().count();

        Position::new(line as u32, character as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_across_lines() {
        let text = "ab\ncd\n";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 0), Position::new(0, 0));
        assert_eq!(index.position(text, 2), Position::new(0, 2));
        assert_eq!(index.position(text, 3), Position::new(1, 0));
        assert_eq!(index.position(text, 6), Position::new(2, 0));
        assert_eq!(index.position(text, 60), Position::new(2, 0));
    }

    #[test]
    fn test_utf16_columns() {
        // '😀' is 4 bytes in UTF-8 and 2 units in UTF-16
        let text = "😀x";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 4), Position::new(0, 2));
        assert_eq!(index.position(text, 5), Position::new(0, 3));
        // Inside the emoji snaps back to its start
        assert_eq!(index.position(text, 2), Position::new(0, 0));
    }

    #[test]
    fn test_document_state_language() {
        let doc = DocumentState::new("<p>".to_string(), Some(Language::Html));
        assert_eq!(doc.language, Some(Language::Html));
        assert_eq!(doc.position(3), Position::new(0, 3));
    }
}
