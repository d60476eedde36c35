//! Classified spans for semantic highlighting.
//!
//! Walks the parse tree and emits one span per variant, separator, class,
//! property part, group delimiter and important marker. Editors map the
//! kinds to theme scopes through the legend in `HIGHLIGHT_KINDS`.

use serde::Serialize;
use utilclass_lexer::{Span, Token};

use crate::ast::{ClassNode, GroupNode, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightKind {
    Variant,
    Separator,
    Class,
    PropertyName,
    PropertyValue,
    GroupOpen,
    GroupClose,
    Important,
}

impl HighlightKind {
    /// Token type name announced in an editor legend.
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightKind::Variant => "variant",
            HighlightKind::Separator => "separator",
            HighlightKind::Class => "class",
            HighlightKind::PropertyName => "propertyName",
            HighlightKind::PropertyValue => "propertyValue",
            HighlightKind::GroupOpen => "groupOpen",
            HighlightKind::GroupClose => "groupClose",
            HighlightKind::Important => "important",
        }
    }
}

pub const HIGHLIGHT_KINDS: &[HighlightKind] = &[
    HighlightKind::Variant,
    HighlightKind::Separator,
    HighlightKind::Class,
    HighlightKind::PropertyName,
    HighlightKind::PropertyValue,
    HighlightKind::GroupOpen,
    HighlightKind::GroupClose,
    HighlightKind::Important,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub span: Span,
    pub kind: HighlightKind,
}

/// Collect highlights for `tree`, sorted by position.
///
/// `separator` must be the separator the tree was parsed with.
pub fn highlights(tree: &[Node<'_>], separator: &str) -> Vec<Highlight> {
    let mut collector = HighlightCollector {
        separator_len: separator.len(),
        highlights: Vec::new(),
    };
    collector.nodes(tree);
    collector.finish()
}

struct HighlightCollector {
    separator_len: usize,
    highlights: Vec<Highlight>,
}

impl HighlightCollector {
    fn finish(mut self) -> Vec<Highlight> {
        self.highlights.sort_by_key(|h| (h.span.start, h.span.end));
        self.highlights
    }

    fn push(&mut self, span: Span, kind: HighlightKind) {
        self.highlights.push(Highlight { span, kind });
    }

    fn nodes(&mut self, nodes: &[Node<'_>]) {
        for node in nodes {
            match node {
                Node::Class(class) => self.class(class),
                Node::Group(group) => self.group(group),
                Node::Dangling(dangling) => self.variants(&dangling.variants),
            }
        }
    }

    fn variants(&mut self, variants: &[Token<'_>]) {
        for variant in variants {
            self.push(variant.span, HighlightKind::Variant);
            let end = variant.end();
            self.push(Span::new(end, end + self.separator_len), HighlightKind::Separator);
        }
    }

    fn class(&mut self, class: &ClassNode<'_>) {
        self.variants(&class.variants);
        match &class.property {
            Some(property) => {
                self.push(property.name.span, HighlightKind::PropertyName);
                self.push(property.value.span, HighlightKind::PropertyValue);
            }
            None => self.push(class.token.span, HighlightKind::Class),
        }
        self.important(class.important_at);
    }

    fn group(&mut self, group: &GroupNode<'_>) {
        self.variants(&group.variants);
        self.push(group.open, HighlightKind::GroupOpen);
        self.nodes(&group.children);
        self.push(group.close, HighlightKind::GroupClose);
        self.important(group.important_at);
    }

    fn important(&mut self, at: Option<usize>) {
        if let Some(at) = at {
            self.push(Span::new(at, at + 1), HighlightKind::Important);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, ParseOptions};
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<(&str, HighlightKind)> {
        let options = ParseOptions::default();
        let result = parse(text, &options).unwrap();
        highlights(&result.tree, &options.separator)
            .into_iter()
            .map(|h| (&text[h.span.start..h.span.end], h.kind))
            .collect()
    }

    #[test]
    fn test_variant_and_class() {
        assert_eq!(
            kinds("md:p-2"),
            vec![
                ("md", HighlightKind::Variant),
                (":", HighlightKind::Separator),
                ("p-2", HighlightKind::Class),
            ]
        );
    }

    #[test]
    fn test_group_delimiters_and_important() {
        assert_eq!(
            kinds("lg:(a b!)!"),
            vec![
                ("lg", HighlightKind::Variant),
                (":", HighlightKind::Separator),
                ("(", HighlightKind::GroupOpen),
                ("a", HighlightKind::Class),
                ("b", HighlightKind::Class),
                ("!", HighlightKind::Important),
                (")", HighlightKind::GroupClose),
                ("!", HighlightKind::Important),
            ]
        );
    }

    #[test]
    fn test_property_parts() {
        assert_eq!(
            kinds("color[red]"),
            vec![
                ("color", HighlightKind::PropertyName),
                ("red", HighlightKind::PropertyValue),
            ]
        );
    }

    #[test]
    fn test_dangling_variants() {
        assert_eq!(
            kinds("focus:"),
            vec![
                ("focus", HighlightKind::Variant),
                (":", HighlightKind::Separator),
            ]
        );
    }

    #[test]
    fn test_legend_names_are_unique() {
        let mut names: Vec<&str> = HIGHLIGHT_KINDS.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), HIGHLIGHT_KINDS.len());
    }
}
