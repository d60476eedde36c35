//! Comment-aware delimiter matching.
//!
//! Two comment forms are skipped: block comments (`/* ... */`) and line
//! comments (`// ...` up to the next line break). A `//` directly after `:`,
//! `(`, `'` or `"` starts a URL (`url(https://...)`, `url(//cdn...)`), not a
//! comment.

use std::borrow::Cow;
use std::ops::Range;

/// If a comment starts at byte `at`, return the offset just past it.
///
/// Unterminated block comments and line comments without a trailing line
/// break run to `end`. The line break itself is not part of a line comment.
pub fn comment_end(text: &str, at: usize, end: usize) -> Option<usize> {
    let rest = &text[at..end];
    if let Some(body) = rest.strip_prefix("/*") {
        return Some(match body.find("*/") {
            Some(close) => at + 2 + close + 2,
            None => end,
        });
    }
    if rest.starts_with("//") && !text[..at].ends_with([':', '(', '\'', '"']) {
        return Some(match rest.find('\n') {
            Some(newline) => at + newline,
            None => end,
        });
    }
    None
}

/// Find the `close` delimiter balancing the `open` delimiter at `open_pos`.
///
/// Scans forward inside `range`, counting nested `open`/`close` pairs and
/// skipping comments. Returns the byte offset of the matching `close`, or
/// `None` when `open_pos` does not hold `open` or the depth never returns to
/// zero before `range.end`.
pub fn find_matching_close(
    text: &str,
    open_pos: usize,
    range: Range<usize>,
    open: char,
    close: char,
) -> Option<usize> {
    let end = range.end.min(text.len());
    if open_pos < range.start || open_pos >= end || !text[open_pos..end].starts_with(open) {
        return None;
    }

    let mut depth = 0usize;
    let mut pos = open_pos;
    while pos < end {
        if let Some(next) = comment_end(text, pos, end) {
            pos = next;
            continue;
        }
        let ch = text[pos..end].chars().next()?;
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        }
        pos += ch.len_utf8();
    }
    None
}

/// Remove every comment from `text`.
///
/// Returns the input unchanged (borrowed) when it holds no comment.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    if !text.contains("/*") && !text.contains("//") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos < text.len() {
        if let Some(next) = comment_end(text, pos, text.len()) {
            pos = next;
            continue;
        }
        let Some(ch) = text[pos..].chars().next() else {
            break;
        };
        out.push(ch);
        pos += ch.len_utf8();
    }

    if out.len() == text.len() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paren(text: &str, open_pos: usize) -> Option<usize> {
        find_matching_close(text, open_pos, 0..text.len(), '(', ')')
    }

    // =========================================================================
    // Depth counting
    // =========================================================================

    #[test]
    fn test_simple_pair() {
        assert_eq!(paren("(a)", 0), Some(2));
    }

    #[test]
    fn test_nested_pairs() {
        let text = "md:(hover:(a b) c)";
        assert_eq!(paren(text, 3), Some(17));
        assert_eq!(paren(text, 10), Some(14));
    }

    #[test]
    fn test_empty_pair() {
        assert_eq!(paren("focus:()", 6), Some(7));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(paren("(a (b)", 0), None);
        assert_eq!(paren("text-red (", 9), None);
    }

    #[test]
    fn test_open_pos_not_an_open_delimiter() {
        assert_eq!(paren("a(b)", 0), None);
    }

    #[test]
    fn test_open_pos_outside_range() {
        assert_eq!(find_matching_close("a (b)", 2, 3..5, '(', ')'), None);
        assert_eq!(find_matching_close("a (b)", 5, 0..5, '(', ')'), None);
    }

    #[test]
    fn test_range_end_cuts_match() {
        let text = "(a b) c";
        assert_eq!(find_matching_close(text, 0, 0..4, '(', ')'), None);
        assert_eq!(find_matching_close(text, 0, 0..5, '(', ')'), Some(4));
    }

    #[test]
    fn test_square_brackets() {
        let text = "w-[calc(100%-2px)]";
        assert_eq!(find_matching_close(text, 2, 0..text.len(), '[', ']'), Some(17));
    }

    #[test]
    fn test_other_delimiters_are_ignored() {
        assert_eq!(paren("(a[)] b)", 0), Some(3));
    }

    #[test]
    fn test_multibyte_content() {
        let text = "(é ü)";
        assert_eq!(paren(text, 0), Some(text.len() - 1));
    }

    // =========================================================================
    // Comments
    // =========================================================================

    #[test]
    fn test_block_comment_hides_close() {
        assert_eq!(paren("(a /* ) */ b)", 0), Some(12));
    }

    #[test]
    fn test_line_comment_hides_close() {
        let text = "(a // )\n b)";
        assert_eq!(paren(text, 0), Some(10));
    }

    #[test]
    fn test_line_comment_to_end_of_range() {
        assert_eq!(paren("(a // b)", 0), None);
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(paren("(a /* b)", 0), None);
    }

    #[test]
    fn test_protocol_relative_url_is_not_a_comment() {
        for text in [
            "bg-[url(//cdn.x/a.png)]",
            "bg-[url('//cdn.x/a.png')]",
            "bg-[url(\"//cdn.x/a.png\")]",
        ] {
            assert_eq!(
                find_matching_close(text, 3, 0..text.len(), '[', ']'),
                Some(text.len() - 1),
                "text: {text}"
            );
        }
        assert!(matches!(strip_comments("url(//cdn.x/a.png)"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_url_scheme_is_not_a_comment() {
        let text = "bg[url(https://x.io/a.png)]";
        assert_eq!(find_matching_close(text, 2, 0..text.len(), '[', ']'), Some(26));
    }

    // =========================================================================
    // Comment stripping
    // =========================================================================

    #[test]
    fn test_strip_nothing_borrows() {
        assert!(matches!(strip_comments("red"), Cow::Borrowed("red")));
    }

    #[test]
    fn test_strip_block_comment() {
        assert_eq!(strip_comments("#fff/* brand */"), "#fff");
        assert_eq!(strip_comments("1px /* a */ solid"), "1px  solid");
    }

    #[test]
    fn test_strip_line_comment_keeps_newline() {
        assert_eq!(strip_comments("red // note\nblue"), "red \nblue");
    }

    #[test]
    fn test_strip_keeps_url() {
        let value = "url(https://x.io/a.png)";
        assert!(matches!(strip_comments(value), Cow::Borrowed(_)));
    }
}
