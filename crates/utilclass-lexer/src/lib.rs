//! utilclass lexer
//!
//! Low-level building blocks for utility-class notation: byte spans, borrowed
//! tokens, the cursor boundary predicate shared by every point query, a range
//! scanner, and the comment-aware bracket matcher.
//!
//! # Example
//!
//! ```
//! use utilclass_lexer::find_matching_close;
//!
//! let text = "hover:(bg-white text-black)";
//! assert_eq!(find_matching_close(text, 6, 0..text.len(), '(', ')'), Some(26));
//! ```

pub mod bracket;
pub mod scanner;
pub mod token;

pub use bracket::{comment_end, find_matching_close, strip_comments};
pub use scanner::{is_property_name, Scanner, Syntax};
pub use token::{CursorMode, Span, Token};
