//! Canonical, fully qualified class strings.
//!
//! ```text
//! md:(hover:p-2 m-1)!  →  md:hover:p-2!  md:m-1!
//! ```

use utilclass_lexer::strip_comments;

use crate::ast::ClassEntry;
use crate::options::ParseOptions;
use crate::parser::Parser;
use crate::OptionsError;

impl ClassEntry<'_> {
    /// Render the entry as `variant<sep>...class` with a trailing `!` when
    /// important. Comments inside a css-property value are dropped.
    pub fn to_canonical(&self, separator: &str) -> String {
        let mut out = String::new();
        for variant in &self.variants {
            out.push_str(variant.text);
            out.push_str(separator);
        }

        match &self.property {
            Some(property) => {
                out.push_str(property.name.text);
                out.push('[');
                out.push_str(strip_comments(property.value.text).trim());
                out.push(']');
            }
            None => out.push_str(self.token.text),
        }

        if self.important {
            out.push('!');
        }
        out
    }
}

/// Flatten every class in `text` to its canonical form, in source order.
///
/// Always runs a full traversal: the cursor and greedy fields of `options`
/// are ignored.
pub fn flatten(text: &str, options: &ParseOptions) -> Result<Vec<String>, OptionsError> {
    let options = ParseOptions {
        cursor: None,
        greedy: true,
        ..options.clone()
    };
    let result = Parser::parse(text, &options)?;
    Ok(result
        .class_list
        .iter()
        .map(|entry| entry.to_canonical(&options.separator))
        .collect())
}
