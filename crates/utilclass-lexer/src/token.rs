use serde::Serialize;

/// A half-open byte range `[start, end)` into the parsed fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past its end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether a cursor at `offset` selects this span.
    ///
    /// Completion queries select a span when the cursor sits anywhere from its
    /// first character up to just past its last one (`start <= offset <= end`),
    /// so typing can continue at the end of a token. Hover queries exclude the
    /// end position (`start <= offset < end`). An offset before `start` never
    /// selects.
    pub fn selects(&self, offset: usize, mode: CursorMode) -> bool {
        match mode {
            CursorMode::Complete => offset >= self.start && offset <= self.end,
            CursorMode::Hover => offset >= self.start && offset < self.end,
        }
    }
}

/// Adjacency rule used when matching a cursor offset against a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorMode {
    /// The end offset of a token still selects it.
    #[default]
    Complete,
    /// Only offsets strictly inside the token select it.
    Hover,
}

impl CursorMode {
    pub fn from_hover(hover: bool) -> Self {
        if hover {
            CursorMode::Hover
        } else {
            CursorMode::Complete
        }
    }
}

/// A span of the source together with the text it covers.
///
/// Tokens borrow from the parsed fragment, so copying one into every entry
/// that inherits it costs two offsets and a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token<'a> {
    pub span: Span,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Cut the token `[start, end)` out of `source`.
    ///
    /// Both offsets must lie on character boundaries of `source`.
    pub fn slice(source: &'a str, start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            text: &source[start..end],
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}
