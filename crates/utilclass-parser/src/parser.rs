//! Recursive-descent parser for utility-class notation.
//!
//! A fragment is a sequence of *runs* (maximal stretches of non-space text)
//! and *groups* (`(...)`, optionally followed by `!`). A run is a chain of
//! `variant:` tokens ending in a class, a group, or nothing at all. Groups
//! recurse with the variant chain in front of them added to the context.
//!
//! Malformed text degrades instead of failing: an unmatched `(` or `[` stops
//! parsing at its level and keeps what was already collected.

use std::ops::Range;

use tracing::{debug, trace};
use utilclass_lexer::{
    comment_end, find_matching_close, is_property_name, CursorMode, Scanner, Span, Syntax, Token,
};

use crate::ast::{
    ClassEntry, ClassNode, CssProperty, DanglingNode, EmptyGroup, GroupNode, Node, ParseResult,
    SelectionInfo,
};
use crate::options::ParseOptions;
use crate::OptionsError;

/// Outcome of parsing one run or group.
enum Step<'a> {
    /// A node was produced; resume at the offset.
    Parsed(Node<'a>, usize),
    /// Nothing to represent; resume at the offset.
    Skipped(usize),
    /// Unmatched delimiter; stop parsing the current level.
    Truncated,
}

/// Class-notation parser.
///
/// Builds the parse tree while collecting the flat class list, the empty
/// groups and the cursor selection in the same pass.
pub struct Parser<'a, 'o> {
    text: &'a str,
    syntax: Syntax<'o>,
    cursor: Option<usize>,
    mode: CursorMode,
    greedy: bool,
    max_depth: usize,
    class_list: Vec<ClassEntry<'a>>,
    empty: Vec<EmptyGroup<'a>>,
    selection: SelectionInfo<'a>,
    /// Bumped on every selection write, so a group or run can tell whether
    /// the selection landed inside it.
    selection_writes: usize,
    resolved: bool,
}

impl<'a, 'o> Parser<'a, 'o> {
    /// Create a parser for `text`. Options are not validated here.
    pub fn new(text: &'a str, options: &'o ParseOptions) -> Self {
        Self {
            text,
            syntax: options.syntax(),
            cursor: options.cursor,
            mode: options.mode(),
            greedy: options.greedy,
            max_depth: options.max_depth,
            class_list: Vec::new(),
            empty: Vec::new(),
            selection: SelectionInfo::default(),
            selection_writes: 0,
            resolved: false,
        }
    }

    /// Validate `options` and parse the selected range of `text`.
    pub fn parse(text: &'a str, options: &'o ParseOptions) -> Result<ParseResult<'a>, OptionsError> {
        let range = options.validate(text)?;
        trace!(
            start = range.start,
            end = range.end,
            cursor = ?options.cursor,
            hover = options.hover,
            greedy = options.greedy,
            "parsing class notation"
        );

        let mut parser = Parser::new(text, options);
        let tree = parser.parse_range(range, &[], 0);
        Ok(parser.finish(tree))
    }

    fn finish(self, tree: Vec<Node<'a>>) -> ParseResult<'a> {
        if self.halted() {
            debug!(cursor = ?self.cursor, "cursor resolved, traversal stopped early");
        }
        ParseResult {
            tree,
            class_list: self.class_list,
            empty: self.empty,
            selection: self.selection,
        }
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Parse every run and group in `range` under the variant `context`.
    fn parse_range(
        &mut self,
        range: Range<usize>,
        context: &[Token<'a>],
        depth: usize,
    ) -> Vec<Node<'a>> {
        let mut nodes = Vec::new();
        let mut scanner = Scanner::new(self.text, range);

        while !self.halted() {
            scanner.skip_whitespace();
            let Some(ch) = scanner.peek() else {
                break;
            };
            let start = scanner.pos();
            if let Some(next) = comment_end(self.text, start, scanner.end()) {
                scanner.seek(next);
                continue;
            }

            let step = if self.syntax.is_group_close(ch) {
                // Stray close brace with no open brace in this range.
                Step::Skipped(start + ch.len_utf8())
            } else if self.syntax.is_group_open(ch) {
                self.parse_group(start, scanner.end(), context.to_vec(), Vec::new(), depth)
            } else {
                self.parse_run(start, scanner.end(), context, depth)
            };

            match step {
                Step::Parsed(node, next) => {
                    nodes.push(node);
                    scanner.seek(next);
                }
                Step::Skipped(next) => scanner.seek(next),
                Step::Truncated => break,
            }
        }

        nodes
    }

    /// Parse one run starting at `start`, which holds neither whitespace nor
    /// a group delimiter.
    fn parse_run(
        &mut self,
        start: usize,
        end: usize,
        context: &[Token<'a>],
        depth: usize,
    ) -> Step<'a> {
        let mut scanner = Scanner::new(self.text, start..end);
        let mut chain: Vec<Token<'a>> = Vec::new();
        let mut segment = start;
        let writes_before = self.selection_writes;
        // First `[...]` pair of the current segment.
        let mut brackets: Option<(usize, usize)> = None;

        while !scanner.at_run_end(&self.syntax) {
            let pos = scanner.pos();
            if pos > segment && scanner.eat(self.syntax.separator) {
                let variant = Token::slice(self.text, segment, pos);
                chain.push(variant);
                self.select_variant(variant, context, &chain, depth);
                segment = scanner.pos();
                brackets = None;
                continue;
            }

            match scanner.peek() {
                Some(ch) if self.syntax.is_group_open(ch) => {
                    if pos == segment {
                        let inner = [context, chain.as_slice()].concat();
                        return self.parse_group(pos, end, inner, chain, depth);
                    }
                    // `a(b)`: the class ends where the group begins.
                    break;
                }
                Some('[') if self.syntax.handle_brackets => {
                    let Some(close) = find_matching_close(self.text, pos, pos..end, '[', ']')
                    else {
                        debug!(offset = pos, "unmatched `[`, truncating");
                        return Step::Truncated;
                    };
                    brackets.get_or_insert((pos, close));
                    scanner.seek(close + 1);
                }
                _ => {
                    scanner.advance();
                }
            }
        }

        let pos = scanner.pos();
        let node = if pos == segment {
            self.dangling(Span::new(start, pos), context, chain, depth)
        } else {
            self.class(Span::new(segment, pos), context, chain, brackets, depth)
        };
        // A class's own `!` covers a cursor on any variant of its chain.
        if let Node::Class(class) = &node {
            if class.important_at.is_some() && self.selection_writes != writes_before {
                self.selection.important = true;
            }
        }
        Step::Parsed(node, pos)
    }

    /// Parse the group whose open delimiter sits at `open`. `context` is the
    /// full chain the children inherit; `chain` is the part written directly
    /// in front of the group.
    fn parse_group(
        &mut self,
        open: usize,
        end: usize,
        context: Vec<Token<'a>>,
        chain: Vec<Token<'a>>,
        depth: usize,
    ) -> Step<'a> {
        let (open_brace, close_brace) = (self.syntax.open_brace, self.syntax.close_brace);
        let Some(close) = find_matching_close(self.text, open, open..end, open_brace, close_brace)
        else {
            debug!(offset = open, "unmatched `{open_brace}`, truncating");
            return Step::Truncated;
        };

        let open_span = Span::new(open, open + open_brace.len_utf8());
        let close_span = Span::new(close, close + close_brace.len_utf8());
        let mut next = close_span.end;
        let important_at =
            (self.syntax.handle_important && self.text[next..end].starts_with('!')).then_some(next);
        if important_at.is_some() {
            next += 1;
        }

        if depth >= self.max_depth {
            debug!(offset = open, depth, "group nested past the depth cap, skipping");
            return Step::Skipped(next);
        }

        let span = Span::new(open, close_span.end);
        let writes_before = self.selection_writes;
        if self.hit(span) {
            // Provisional: a token inside the group replaces this.
            self.write_selection(SelectionInfo {
                selected: None,
                variants: context.clone(),
                important: false,
                inside_group: true,
            });
        }

        let before = self.class_list.len();
        let children = self.parse_range(open_span.end..close, &context, depth + 1);

        if self.class_list.len() == before && !self.halted() {
            self.empty.push(EmptyGroup {
                span,
                variants: context,
            });
        }
        if important_at.is_some() {
            for entry in &mut self.class_list[before..] {
                entry.important = true;
            }
            if self.selection_writes != writes_before {
                self.selection.important = true;
            }
        }

        let node = Node::Group(GroupNode {
            variants: chain,
            open: open_span,
            close: close_span,
            important_at,
            children,
        });
        Step::Parsed(node, next)
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    /// Record the class whose raw text (important marker included) is `raw`.
    fn class(
        &mut self,
        raw: Span,
        context: &[Token<'a>],
        chain: Vec<Token<'a>>,
        brackets: Option<(usize, usize)>,
        depth: usize,
    ) -> Node<'a> {
        let source = self.text;
        let text = &source[raw.start..raw.end];
        let important_at = (self.syntax.handle_important && text.len() > 1 && text.ends_with('!'))
            .then_some(raw.end - 1);
        let token = Token::slice(source, raw.start, important_at.unwrap_or(raw.end));

        let property = brackets.and_then(|(open, close)| {
            (close + 1 == token.end() && is_property_name(&source[raw.start..open])).then(|| {
                CssProperty {
                    name: Token::slice(source, raw.start, open),
                    value: Token::slice(source, open + 1, close),
                }
            })
        });

        let variants = [context, chain.as_slice()].concat();
        let important = important_at.is_some();
        if self.hit(raw) {
            self.resolve(SelectionInfo {
                selected: Some(token),
                variants: variants.clone(),
                important,
                inside_group: depth > 0,
            });
        }

        self.class_list.push(ClassEntry {
            token,
            variants,
            important,
            property,
        });
        Node::Class(ClassNode {
            variants: chain,
            token,
            important_at,
            property,
        })
    }

    /// Record a variant chain with nothing after its last separator.
    fn dangling(
        &mut self,
        span: Span,
        context: &[Token<'a>],
        chain: Vec<Token<'a>>,
        depth: usize,
    ) -> Node<'a> {
        let variants = [context, chain.as_slice()].concat();
        // The cursor right after the separator is about to type a class.
        if self.hit(Span::new(span.end, span.end)) {
            self.resolve(SelectionInfo {
                selected: None,
                variants: variants.clone(),
                important: false,
                inside_group: depth > 0,
            });
        }

        self.empty.push(EmptyGroup { span, variants });
        Node::Dangling(DanglingNode {
            variants: chain,
            span,
        })
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    fn select_variant(
        &mut self,
        variant: Token<'a>,
        context: &[Token<'a>],
        chain: &[Token<'a>],
        depth: usize,
    ) {
        if self.hit(variant.span) {
            self.resolve(SelectionInfo {
                selected: Some(variant),
                variants: [context, chain].concat(),
                important: false,
                inside_group: depth > 0,
            });
        }
    }

    /// Whether an unresolved cursor selects `span`.
    fn hit(&self, span: Span) -> bool {
        !self.resolved && self.cursor.is_some_and(|cursor| span.selects(cursor, self.mode))
    }

    fn resolve(&mut self, selection: SelectionInfo<'a>) {
        self.write_selection(selection);
        self.resolved = true;
    }

    fn write_selection(&mut self, selection: SelectionInfo<'a>) {
        self.selection = selection;
        self.selection_writes += 1;
    }

    /// A resolved non-greedy query needs no further traversal.
    fn halted(&self) -> bool {
        self.resolved && !self.greedy
    }
}
