//! Which lowering passes run.

use rustc_hash::FxHashSet;
use std::fmt;

/// A lowering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
  /// `assert` into `if not (...): raise`.
  Assert,
  /// `elif` into guarded `if`.
  Elif,
  /// a trailing `else` into guarded `if`.
  Else,
  /// `break` into clearing a loop flag, and `while` into a flag-guarded loop.
  Break,
  /// `for` into `while` over an iterator.
  For,
  /// `return` into a suspend-based body plus a driver.
  Return,
  /// `not` into a helper call.
  Not,
  /// `in` and `not in` into helper calls.
  In,
  /// `and` into a helper call.
  And,
  /// `or` into a helper call.
  Or,
}

impl Pass {
  /// All the passes, in the order they run. The statement passes come before the expression
  /// passes.
  pub const ALL: [Pass; 10] = [
    Pass::Assert,
    Pass::Elif,
    Pass::Else,
    Pass::Break,
    Pass::For,
    Pass::Return,
    Pass::Not,
    Pass::In,
    Pass::And,
    Pass::Or,
  ];

  /// The keyword naming this pass in a selection file.
  #[must_use]
  pub fn keyword(self) -> &'static str {
    match self {
      Pass::Assert => "ASSERT",
      Pass::Elif => "ELIF",
      Pass::Else => "ELSE",
      Pass::Break => "BREAK",
      Pass::For => "FOR",
      Pass::Return => "RETURN",
      Pass::Not => "NOT",
      Pass::In => "IN",
      Pass::And => "AND",
      Pass::Or => "OR",
    }
  }

  /// Whether this rewrites expressions rather than restructuring statements.
  #[must_use]
  pub fn is_expr(self) -> bool {
    matches!(self, Pass::Not | Pass::In | Pass::And | Pass::Or)
  }
}

impl fmt::Display for Pass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.keyword())
  }
}

impl std::str::FromStr for Pass {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Pass::ALL.into_iter().find(|p| p.keyword().eq_ignore_ascii_case(s)).ok_or(())
  }
}

/// A set of enabled passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passes(FxHashSet<Pass>);

impl Passes {
  /// Every pass.
  #[must_use]
  pub fn all() -> Self {
    Pass::ALL.into_iter().collect()
  }

  /// No passes. Lowering with this is the identity.
  #[must_use]
  pub fn none() -> Self {
    Passes(FxHashSet::default())
  }

  /// Enables the pass.
  pub fn insert(&mut self, p: Pass) {
    self.0.insert(p);
  }

  /// Returns whether the pass is enabled.
  #[must_use]
  pub fn contains(&self, p: Pass) -> bool {
    self.0.contains(&p)
  }

  /// Returns the enabled passes in the order they run.
  pub fn iter(&self) -> impl Iterator<Item = Pass> + '_ {
    Pass::ALL.into_iter().filter(|&p| self.contains(p))
  }

  /// Parses a selection file: one pass keyword per line, case-insensitive. Blank lines and lines
  /// starting with `#` are skipped.
  ///
  /// # Errors
  ///
  /// If a line is not a pass keyword.
  pub fn from_keywords(s: &str) -> Result<Self, PassError> {
    let mut ret = Passes::none();
    for (idx, line) in s.lines().enumerate() {
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }
      let Ok(p) = line.parse::<Pass>() else {
        return Err(PassError { line: idx + 1, keyword: line.to_owned() });
      };
      ret.insert(p);
    }
    log::info!("selected passes: {:?}", ret.iter().map(Pass::keyword).collect::<Vec<_>>());
    Ok(ret)
  }
}

impl Default for Passes {
  fn default() -> Self {
    Passes::all()
  }
}

impl FromIterator<Pass> for Passes {
  fn from_iter<T: IntoIterator<Item = Pass>>(iter: T) -> Self {
    Passes(iter.into_iter().collect())
  }
}

/// An unrecognized keyword in a selection file.
#[derive(Debug)]
pub struct PassError {
  line: usize,
  keyword: String,
}

impl PassError {
  /// The 1-based line number of the keyword.
  #[must_use]
  pub fn line(&self) -> usize {
    self.line
  }
}

impl fmt::Display for PassError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "line {}: unknown pass `{}`; expected one of ", self.line, self.keyword)?;
    let mut iter = Pass::ALL.into_iter();
    if let Some(p) = iter.next() {
      write!(f, "{p}")?;
    }
    for p in iter {
      write!(f, ", {p}")?;
    }
    Ok(())
  }
}

impl std::error::Error for PassError {}
