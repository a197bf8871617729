//! Runtime helpers the logical-operator lowering calls into.

use std::fmt;

/// A runtime helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
  /// Replaces `not`.
  Not,
  /// Replaces `in`.
  In,
  /// Replaces `not in`.
  NotIn,
  /// Replaces `and`.
  And,
  /// Replaces `or`.
  Or,
}

impl Helper {
  /// All the helpers, in the order they are emitted.
  pub const ALL: [Helper; 5] = [Helper::Not, Helper::In, Helper::NotIn, Helper::And, Helper::Or];

  /// The name the helper is bound to in the output.
  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      Helper::Not => "_not",
      Helper::In => "_in",
      Helper::NotIn => "_not_in",
      Helper::And => "_and",
      Helper::Or => "_or",
    }
  }

  fn idx(self) -> usize {
    match self {
      Helper::Not => 0,
      Helper::In => 1,
      Helper::NotIn => 2,
      Helper::And => 3,
      Helper::Or => 4,
    }
  }
}

impl fmt::Display for Helper {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Which helpers were used.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Helpers([bool; 5]);

impl Helpers {
  /// Marks the helper as used.
  pub fn insert(&mut self, h: Helper) {
    self.0[h.idx()] = true;
  }

  /// Returns whether the helper was used.
  #[must_use]
  pub fn contains(&self, h: Helper) -> bool {
    self.0[h.idx()]
  }

  /// Returns whether no helper was used.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    !self.0.iter().any(|&x| x)
  }

  /// Returns the used helpers, in emission order.
  pub fn iter(&self) -> impl Iterator<Item = Helper> + '_ {
    Helper::ALL.into_iter().filter(|&h| self.contains(h))
  }
}
