//! Functions concerning identifiers.

/// Returns whether this is a char that can start an identifier.
#[must_use]
pub fn is_start(c: char) -> bool {
  c.is_alphabetic() || c == '_'
}

/// Returns whether this is a char that can continue an identifier (any non-starting char).
#[must_use]
pub fn is_continue(c: char) -> bool {
  c.is_alphanumeric() || c == '_'
}

/// Returns whether this is an ident.
#[must_use]
pub fn is(s: &str) -> bool {
  let mut iter = s.chars();
  iter.next().is_some_and(|fst| is_start(fst) && iter.all(is_continue))
}
