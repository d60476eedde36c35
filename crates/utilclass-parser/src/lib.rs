//! utilclass parser
//!
//! Parses utility-class notation: space-separated classes, optionally
//! prefixed by `variant:` chains, grouped with `(...)`, marked important with
//! a trailing `!`, or written as inline `property[value]` declarations.
//!
//! One traversal produces the parse tree, the flat class list with resolved
//! variants and importance, the empty groups, and (given a cursor) what sits
//! under the cursor. Malformed input never fails; only invalid options do.
//!
//! ```
//! use utilclass_parser::{parse, ParseOptions};
//!
//! let result = parse("md:(p-2 m-1)!", &ParseOptions::default()).unwrap();
//! assert_eq!(result.class_list.len(), 2);
//! assert!(result.class_list.iter().all(|entry| entry.important));
//! ```

pub mod ast;
pub mod flatten;
pub mod highlight;
pub mod options;
pub mod parser;

pub use ast::{
    ClassEntry, ClassNode, CssProperty, DanglingNode, EmptyGroup, GroupNode, Node, ParseResult,
    SelectionInfo,
};
pub use flatten::flatten;
pub use highlight::{highlights, Highlight, HighlightKind, HIGHLIGHT_KINDS};
pub use options::ParseOptions;
pub use parser::Parser;
pub use utilclass_lexer::{CursorMode, Span, Token};

/// Caller contract violation in `ParseOptions`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("range start {start} is past range end {end}")]
    InvertedRange { start: usize, end: usize },

    #[error("range end {end} is past the end of the text ({len} bytes)")]
    RangeOutOfBounds { end: usize, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("cursor {cursor} is outside the text (0..={len})")]
    CursorOutOfBounds { cursor: usize, len: usize },

    #[error("separator must not be empty")]
    EmptySeparator,

    #[error("separator {0:?} contains whitespace or a reserved delimiter")]
    InvalidSeparator(String),

    #[error("invalid group delimiters {open:?} and {close:?}")]
    InvalidDelimiters { open: char, close: char },
}

/// Parse `text` with `options`.
pub fn parse<'a>(text: &'a str, options: &ParseOptions) -> Result<ParseResult<'a>, OptionsError> {
    Parser::parse(text, options)
}

/// Resolve what sits at `cursor` without finishing the traversal.
///
/// Overrides the cursor, hover and greedy fields of `options`.
pub fn query<'a>(
    text: &'a str,
    cursor: usize,
    hover: bool,
    options: &ParseOptions,
) -> Result<SelectionInfo<'a>, OptionsError> {
    let options = ParseOptions {
        cursor: Some(cursor),
        hover,
        greedy: false,
        ..options.clone()
    };
    Ok(Parser::parse(text, &options)?.selection)
}
