//! Errors.

use std::fmt;

/// A parse error. Any one of these aborts the run.
#[derive(Debug)]
pub struct Error {
  pub(crate) line: usize,
  pub(crate) kind: Kind,
}

impl Error {
  /// The 1-based line number of the error.
  #[must_use]
  pub fn line(&self) -> usize {
    self.line
  }
}

#[derive(Debug)]
pub(crate) enum Kind {
  NotBlockKeyword(String),
  ForNotTwoParts,
  EmptyBlock,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "line {}: ", self.line)?;
    match &self.kind {
      Kind::NotBlockKeyword(tok) if tok.is_empty() => {
        f.write_str("a line ending in `:` must start with a block keyword")
      }
      Kind::NotBlockKeyword(tok) => write!(f, "`{tok}` does not start a block"),
      Kind::ForNotTwoParts => f.write_str("`for` header must be `<binder> in <source>`"),
      Kind::EmptyBlock => f.write_str("expected an indented block"),
    }
  }
}

impl std::error::Error for Error {}
