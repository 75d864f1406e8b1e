use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the compilation pipeline.
///
/// Compilation is atomic: any of these aborts it and no partial automaton is
/// produced. Matching itself never fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Empty pattern, or groups nested deeper than `regex::MAX_NESTING`.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An alphanumeric atom was required at `position`.
    #[error("expected alphanumeric character at position {position}, got {}", Found(.found))]
    Parse { position: usize, found: Option<char> },

    /// A group opened with `(` was never closed.
    #[error("missing symbol '{symbol}' at position {position}")]
    MissingSymbol { symbol: char, position: usize },

    /// Parse error for the tokens left over once a complete expression was
    /// read, eg. the `+` of `a+`.
    #[error("unexpected '{found}' at position {position}")]
    TrailingInput { position: usize, found: char },
}

/// Renders the token found by the parser, if any.
struct Found<'a>(&'a Option<char>);

impl<'a> fmt::Display for Found<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            Some(c) => write!(f, "'{}'", c),
            None => write!(f, "end of pattern"),
        }
    }
}
