//! Per-call parser configuration.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use utilclass_lexer::{CursorMode, Syntax};

use crate::OptionsError;

/// Options for one parse call.
///
/// Options are plain data and implement `Hash`/`Eq`, so callers caching
/// results can key on `(text, options)` directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Start of the byte range to parse.
    pub start: usize,
    /// End of the byte range to parse; `None` parses to the end of the text.
    pub end: Option<usize>,
    /// Offset for point queries. `None` skips selection entirely.
    pub cursor: Option<usize>,
    /// Use hover adjacency (end offset excluded) instead of completion adjacency.
    pub hover: bool,
    /// Finish the whole traversal even after the cursor has been resolved.
    pub greedy: bool,
    pub separator: String,
    pub open_brace: char,
    pub close_brace: char,
    /// Enable `(...)` groups and `[...]` values. When off, every run of
    /// non-space text is its own class.
    pub handle_brackets: bool,
    /// Treat a trailing `!` as the important marker.
    pub handle_important: bool,
    /// Groups nested deeper than this are skipped.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            cursor: None,
            hover: false,
            greedy: false,
            separator: ":".to_string(),
            open_brace: '(',
            close_brace: ')',
            handle_brackets: true,
            handle_important: true,
            max_depth: 64,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: Range<usize>) -> Self {
        self.start = range.start;
        self.end = Some(range.end);
        self
    }

    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn with_hover(mut self, hover: bool) -> Self {
        self.hover = hover;
        self
    }

    pub fn with_greedy(mut self, greedy: bool) -> Self {
        self.greedy = greedy;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_braces(mut self, open: char, close: char) -> Self {
        self.open_brace = open;
        self.close_brace = close;
        self
    }

    pub fn with_brackets(mut self, handle_brackets: bool) -> Self {
        self.handle_brackets = handle_brackets;
        self
    }

    pub fn with_important(mut self, handle_important: bool) -> Self {
        self.handle_important = handle_important;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn mode(&self) -> CursorMode {
        CursorMode::from_hover(self.hover)
    }

    pub fn syntax(&self) -> Syntax<'_> {
        Syntax {
            separator: &self.separator,
            open_brace: self.open_brace,
            close_brace: self.close_brace,
            handle_brackets: self.handle_brackets,
            handle_important: self.handle_important,
        }
    }

    /// Check the options against `text` and resolve the byte range to parse.
    pub fn validate(&self, text: &str) -> Result<Range<usize>, OptionsError> {
        let len = text.len();
        let end = self.end.unwrap_or(len);

        if self.start > end {
            return Err(OptionsError::InvertedRange {
                start: self.start,
                end,
            });
        }
        if end > len {
            return Err(OptionsError::RangeOutOfBounds { end, len });
        }
        for offset in [self.start, end] {
            if !text.is_char_boundary(offset) {
                return Err(OptionsError::NotCharBoundary { offset });
            }
        }
        if let Some(cursor) = self.cursor {
            if cursor > len {
                return Err(OptionsError::CursorOutOfBounds { cursor, len });
            }
        }

        self.validate_syntax()?;
        Ok(self.start..end)
    }

    fn validate_syntax(&self) -> Result<(), OptionsError> {
        let (open, close) = (self.open_brace, self.close_brace);
        let reserved = |c: char| c.is_whitespace() || matches!(c, '!' | '[' | ']' | '/' | '*');
        if open == close || reserved(open) || reserved(close) {
            return Err(OptionsError::InvalidDelimiters { open, close });
        }

        if self.separator.is_empty() {
            return Err(OptionsError::EmptySeparator);
        }
        if self
            .separator
            .chars()
            .any(|c| reserved(c) || c == open || c == close)
        {
            return Err(OptionsError::InvalidSeparator(self.separator.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Defaults and builders
    // =========================================================================

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.separator, ":");
        assert_eq!((options.open_brace, options.close_brace), ('(', ')'));
        assert!(options.handle_brackets);
        assert!(options.handle_important);
        assert!(!options.greedy);
        assert_eq!(options.cursor, None);
        assert_eq!(options.mode(), CursorMode::Complete);
    }

    #[test]
    fn test_builders() {
        let options = ParseOptions::new()
            .with_range(2..5)
            .with_cursor(3)
            .with_hover(true)
            .with_separator("::")
            .with_braces('{', '}');
        assert_eq!(options.start, 2);
        assert_eq!(options.end, Some(5));
        assert_eq!(options.cursor, Some(3));
        assert_eq!(options.mode(), CursorMode::Hover);
        assert_eq!(options.syntax().separator, "::");
        assert_eq!(options.syntax().open_brace, '{');
    }

    #[test]
    fn test_deserialize_partial_camel_case() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"cursor": 4, "handleImportant": false}"#).unwrap();
        assert_eq!(options.cursor, Some(4));
        assert!(!options.handle_important);
        assert_eq!(options.separator, ":");
    }

    // =========================================================================
    // Range validation
    // =========================================================================

    #[test]
    fn test_whole_text_range() {
        assert_eq!(ParseOptions::default().validate("md:p-2"), Ok(0..6));
    }

    #[test]
    fn test_inverted_range() {
        let options = ParseOptions::default().with_range(4..2);
        assert_eq!(
            options.validate("abcdef"),
            Err(OptionsError::InvertedRange { start: 4, end: 2 })
        );
    }

    #[test]
    fn test_start_past_text() {
        let options = ParseOptions {
            start: 9,
            ..ParseOptions::default()
        };
        assert_eq!(
            options.validate("abc"),
            Err(OptionsError::InvertedRange { start: 9, end: 3 })
        );
    }

    #[test]
    fn test_end_past_text() {
        let options = ParseOptions::default().with_range(0..9);
        assert_eq!(
            options.validate("abc"),
            Err(OptionsError::RangeOutOfBounds { end: 9, len: 3 })
        );
    }

    #[test]
    fn test_range_inside_multibyte_char() {
        let options = ParseOptions::default().with_range(1..3);
        assert_eq!(
            options.validate("éa"),
            Err(OptionsError::NotCharBoundary { offset: 1 })
        );
    }

    #[test]
    fn test_cursor_bounds() {
        assert!(ParseOptions::default().with_cursor(3).validate("abc").is_ok());
        assert_eq!(
            ParseOptions::default().with_cursor(4).validate("abc"),
            Err(OptionsError::CursorOutOfBounds { cursor: 4, len: 3 })
        );
    }

    // =========================================================================
    // Syntax validation
    // =========================================================================

    #[test]
    fn test_empty_separator() {
        let options = ParseOptions::default().with_separator("");
        assert_eq!(options.validate("a"), Err(OptionsError::EmptySeparator));
    }

    #[test]
    fn test_separator_with_delimiter() {
        let options = ParseOptions::default().with_separator("(");
        assert_eq!(
            options.validate("a"),
            Err(OptionsError::InvalidSeparator("(".into()))
        );
        let options = ParseOptions::default().with_separator("a b");
        assert!(options.validate("a").is_err());
    }

    #[test]
    fn test_separator_with_comment_characters() {
        for separator in ["//", "/*", "*", "-/"] {
            let options = ParseOptions::default().with_separator(separator);
            assert_eq!(
                options.validate("a"),
                Err(OptionsError::InvalidSeparator(separator.into()))
            );
        }
    }

    #[test]
    fn test_invalid_delimiters() {
        for (open, close) in [('(', '('), ('[', ']'), (' ', ')'), ('(', '!')] {
            let options = ParseOptions::default().with_braces(open, close);
            assert_eq!(
                options.validate("a"),
                Err(OptionsError::InvalidDelimiters { open, close })
            );
        }
    }
}
