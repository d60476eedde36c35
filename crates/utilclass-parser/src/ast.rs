//! Parse tree and flat results for utility-class notation.
//!
//! The tree (`Node`) keeps every delimiter position for editor painting. The
//! flat views (`ClassEntry`, `EmptyGroup`) carry fully resolved variant chains
//! and importance, ready for completion, hover and link consumers.

use serde::Serialize;
use utilclass_lexer::{Span, Token};

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A node of the parse tree.
///
/// `variants` on each node lists only the chain written directly in front of
/// it (`md:dark:` in `md:dark:(...)`); enclosing groups contribute the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node<'a> {
    /// A single class, optionally prefixed by variants.
    Class(ClassNode<'a>),

    /// A delimited group sharing the variants in front of it.
    Group(GroupNode<'a>),

    /// A variant chain followed by nothing (`focus:` at the end of a run).
    Dangling(DanglingNode<'a>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNode<'a> {
    pub variants: Vec<Token<'a>>,
    /// Class text without its important marker.
    pub token: Token<'a>,
    /// Offset of the class's own trailing `!`.
    pub important_at: Option<usize>,
    pub property: Option<CssProperty<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupNode<'a> {
    pub variants: Vec<Token<'a>>,
    pub open: Span,
    pub close: Span,
    /// Offset of the `!` right after the close delimiter.
    pub important_at: Option<usize>,
    pub children: Vec<Node<'a>>,
}

impl GroupNode<'_> {
    /// The group from its open delimiter through its close delimiter.
    pub fn span(&self) -> Span {
        Span::new(self.open.start, self.close.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingNode<'a> {
    pub variants: Vec<Token<'a>>,
    pub span: Span,
}

/// `name[value]`: an inline CSS declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CssProperty<'a> {
    pub name: Token<'a>,
    /// Raw text between the brackets, comments included.
    pub value: Token<'a>,
}

// ---------------------------------------------------------------------------
// Flat results
// ---------------------------------------------------------------------------

/// One parsed class with its resolved context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry<'a> {
    /// Class text, important marker stripped.
    pub token: Token<'a>,
    /// Every enclosing variant, outermost first.
    pub variants: Vec<Token<'a>>,
    /// Own `!` or inherited from an enclosing `(...)!` group.
    pub important: bool,
    pub property: Option<CssProperty<'a>>,
}

/// A variant chain or group that closed without producing a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyGroup<'a> {
    pub span: Span,
    pub variants: Vec<Token<'a>>,
}

/// What sits under the cursor of a point query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInfo<'a> {
    pub selected: Option<Token<'a>>,
    /// Variant chain in effect at the cursor, outermost first.
    pub variants: Vec<Token<'a>>,
    pub important: bool,
    pub inside_group: bool,
}

/// Everything one parse call produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult<'a> {
    pub tree: Vec<Node<'a>>,
    pub class_list: Vec<ClassEntry<'a>>,
    pub empty: Vec<EmptyGroup<'a>>,
    pub selection: SelectionInfo<'a>,
}
