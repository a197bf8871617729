//! Errors.

use std::fmt;

/// An error when lowering. Any one of these aborts the run.
#[derive(Debug)]
pub struct Error {
  pub(crate) kind: Kind,
}

#[derive(Debug)]
pub(crate) enum Kind {
  BreakOutsideLoop,
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      Kind::BreakOutsideLoop => f.write_str("`break` outside loop"),
    }
  }
}

impl std::error::Error for Error {}
