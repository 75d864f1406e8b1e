//! Compile small regular expressions into deterministic automata.
//!
//! Patterns are made of letters and digits, alternation `|`, the postfix
//! operators `*` and `?` and grouping parentheses, concatenation being
//! implicit. A pattern goes through Thompson's construction and then subset
//! construction, the resulting DFA decides membership of whole strings:
//!
//! ```
//! let matcher = rex::compile("(a|b)*c?").unwrap();
//!
//! assert!(matcher.matches("aabbbbc"));
//! assert!(!matcher.matches("cc"));
//! ```

pub mod automaton;
pub mod benchmark;
pub mod error;
pub mod matcher;
pub mod regex;

#[cfg(test)]
mod test_utils;

pub use crate::error::{Error, Result};
pub use crate::matcher::Matcher;
pub use crate::regex::{compile, parse};
