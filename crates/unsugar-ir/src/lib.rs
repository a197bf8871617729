//! The tree-shaped intermediate representation.
//!
//! Built once by the parser, rewritten in place by the lowering passes, then read by the emitter.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

mod helper;

pub use helper::{Helper, Helpers};

/// An expression. We never parse these into trees; they are source text to be rewritten.
pub type Expr = String;

/// A sequence of sibling nodes. The order is significant.
pub type Body = Vec<Node>;

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  /// Any line with no more specialized shape, kept as is. Blank lines are empty statements, and
  /// comment-only lines are kept whole, indentation included.
  Stmt(String),
  /// A keyword followed by an optional expression, like `continue` or `yield`.
  KeywordStmt {
    /// The keyword.
    keyword: &'static str,
    /// The expression after the keyword. May be empty.
    expr: Expr,
  },
  /// A `<keyword> <header>:` block not otherwise specialized, like `try:` or `with x as y:`.
  Block {
    /// The keyword that introduces the block.
    token: String,
    /// The text between the keyword and the `:`. May be empty.
    header: Expr,
    /// The body.
    body: Body,
  },
  /// `if`.
  If {
    /// The condition.
    cond: Expr,
    /// The body.
    body: Body,
  },
  /// `elif`.
  Elif {
    /// The condition.
    cond: Expr,
    /// The body.
    body: Body,
  },
  /// `else`.
  Else {
    /// The body.
    body: Body,
  },
  /// `while`.
  While {
    /// The condition.
    cond: Expr,
    /// The body.
    body: Body,
  },
  /// `for <binder> in <source>`.
  For {
    /// What each element is bound to.
    binder: Expr,
    /// What is iterated over.
    source: Expr,
    /// The body.
    body: Body,
  },
  /// `break`.
  Break,
  /// `return`, with a possibly empty expression.
  Return(Expr),
  /// A function definition.
  Def {
    /// The name.
    name: String,
    /// The text between the parentheses.
    params: String,
    /// The return annotation after `->`. May be empty.
    returns: Expr,
    /// The body.
    body: Body,
  },
  /// `assert`.
  Assert(Assert),
}

/// An assertion, with a condition and an optional message. There are always one or two
/// expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assert {
  /// What must hold.
  pub cond: Expr,
  /// What to report when it does not.
  pub msg: Option<Expr>,
}

impl Node {
  /// Returns a plain statement.
  #[must_use]
  pub fn stmt<S>(s: S) -> Node
  where
    S: Into<String>,
  {
    Node::Stmt(s.into())
  }

  /// Returns a keyword statement.
  #[must_use]
  pub fn keyword<S>(keyword: &'static str, expr: S) -> Node
  where
    S: Into<String>,
  {
    Node::KeywordStmt { keyword, expr: expr.into() }
  }

  /// Returns whether this is a blank or comment-only line.
  #[must_use]
  pub fn is_trivia(&self) -> bool {
    matches!(self, Node::Stmt(s) if is_trivia(s))
  }

  /// Returns the body of this node, if it is block-shaped.
  #[must_use]
  pub fn body(&self) -> Option<&[Node]> {
    match self {
      Node::Block { body, .. }
      | Node::If { body, .. }
      | Node::Elif { body, .. }
      | Node::Else { body }
      | Node::While { body, .. }
      | Node::For { body, .. }
      | Node::Def { body, .. } => Some(body.as_slice()),
      Node::Stmt(_)
      | Node::KeywordStmt { .. }
      | Node::Break
      | Node::Return(_)
      | Node::Assert(_) => None,
    }
  }

  /// Returns the body of this node mutably, if it is block-shaped.
  pub fn body_mut(&mut self) -> Option<&mut Body> {
    match self {
      Node::Block { body, .. }
      | Node::If { body, .. }
      | Node::Elif { body, .. }
      | Node::Else { body }
      | Node::While { body, .. }
      | Node::For { body, .. }
      | Node::Def { body, .. } => Some(body),
      Node::Stmt(_)
      | Node::KeywordStmt { .. }
      | Node::Break
      | Node::Return(_)
      | Node::Assert(_) => None,
    }
  }
}

/// Returns whether the line is blank or only a comment. A `#` that starts the trimmed line can not
/// be inside a literal.
#[must_use]
pub fn is_trivia(line: &str) -> bool {
  let line = line.trim_start();
  line.is_empty() || line.starts_with('#')
}

/// Returns the index just past the last node that is not trivia, so things appended there come
/// before any trailing blank or comment lines.
#[must_use]
pub fn end_of_content(body: &[Node]) -> usize {
  body.iter().rposition(|n| !n.is_trivia()).map_or(0, |idx| idx + 1)
}
