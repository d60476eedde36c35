use std::ops::Range;

/// Delimiter configuration for one parse call.
///
/// The `[`/`]` pair used by css-property tokens and arbitrary values is fixed
/// and not part of the syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax<'s> {
    pub separator: &'s str,
    pub open_brace: char,
    pub close_brace: char,
    pub handle_brackets: bool,
    pub handle_important: bool,
}

impl Default for Syntax<'static> {
    fn default() -> Self {
        Self {
            separator: ":",
            open_brace: '(',
            close_brace: ')',
            handle_brackets: true,
            handle_important: true,
        }
    }
}

impl Syntax<'_> {
    pub fn is_group_open(&self, ch: char) -> bool {
        self.handle_brackets && ch == self.open_brace
    }

    pub fn is_group_close(&self, ch: char) -> bool {
        self.handle_brackets && ch == self.close_brace
    }

    /// Whitespace always ends a run of class text; a close brace ends it too
    /// while grouping is enabled.
    pub fn ends_run(&self, ch: char) -> bool {
        ch.is_whitespace() || self.is_group_close(ch)
    }
}

/// Whether `name` can head a css-property token (`name[value]`).
///
/// Names look like CSS identifiers: letters, digits, `-` and `_`, starting
/// with a letter or `-` and not ending with `-` (so `bg-[#fff]` stays an
/// arbitrary-value class).
pub fn is_property_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '-')
        && !name.ends_with('-')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Byte-offset cursor over a sub-range of a fragment.
///
/// Positions are always absolute offsets into the full source, so tokens cut
/// from a scanner over a sub-range line up with the caller's text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `source[range]`.
    ///
    /// The range is clamped to the source; both ends must fall on character
    /// boundaries.
    pub fn new(source: &'a str, range: Range<usize>) -> Self {
        let end = range.end.min(source.len());
        Self {
            source,
            pos: range.start.min(end),
            end,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Move to an absolute offset, clamped to the end of the range.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.end);
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..self.end]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    /// Skip `pattern` if the remaining text starts with it.
    pub fn eat(&mut self, pattern: &str) -> bool {
        if self.starts_with(pattern) {
            self.pos += pattern.len();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Whether the current run of class text ends here.
    pub fn at_run_end(&self, syntax: &Syntax<'_>) -> bool {
        self.peek().map_or(true, |ch| syntax.ends_run(ch))
    }
}
