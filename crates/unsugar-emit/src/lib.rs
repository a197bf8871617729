//! Emit a tree as indented source text, after the definitions of the runtime helpers it uses.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

mod prelude;

use unsugar_ir::{Helpers, Node};

/// Options for emitting.
#[derive(Debug, Clone)]
pub struct Options {
  /// What one level of nesting adds before a line.
  pub indent: String,
}

impl Default for Options {
  fn default() -> Self {
    Options { indent: "\t".to_owned() }
  }
}

/// Returns the text for the nodes, preceded by the used helpers.
#[must_use]
pub fn get(nodes: &[Node], helpers: &Helpers, options: &Options) -> String {
  let mut st = St { out: String::new(), indent: &options.indent, lines: 0 };
  for h in helpers.iter() {
    for line in prelude::get(h).lines() {
      st.raw_line(&line.replace('\t', &options.indent));
    }
    st.raw_line("");
  }
  st.body(nodes, 0);
  log::info!("emitted {} lines", st.lines);
  st.out
}

struct St<'a> {
  out: String,
  indent: &'a str,
  lines: usize,
}

impl St<'_> {
  fn raw_line(&mut self, s: &str) {
    if self.lines != 0 {
      self.out.push('\n');
    }
    self.out.push_str(s);
    self.lines += 1;
  }

  fn line(&mut self, level: usize, s: &str) {
    let mut indented = self.indent.repeat(level);
    indented.push_str(s);
    self.raw_line(&indented);
  }

  fn body(&mut self, nodes: &[Node], level: usize) {
    for node in nodes {
      self.node(node, level);
    }
  }

  fn node(&mut self, node: &Node, level: usize) {
    let header = match node {
      // already indented, or blank.
      Node::Stmt(s) if node.is_trivia() => return self.raw_line(s),
      Node::Stmt(s) => return self.line(level, s),
      Node::KeywordStmt { keyword, expr } => return self.line(level, &spaced(keyword, expr)),
      Node::Break => return self.line(level, "break"),
      Node::Return(e) => return self.line(level, &spaced("return", e)),
      Node::Assert(a) => {
        let mut s = spaced("assert", &a.cond);
        if let Some(msg) = &a.msg {
          s.push_str(", ");
          s.push_str(msg);
        }
        return self.line(level, &s);
      }
      Node::Block { token, header, .. } => spaced(token, header),
      Node::If { cond, .. } => spaced("if", cond),
      Node::Elif { cond, .. } => spaced("elif", cond),
      Node::Else { .. } => "else".to_owned(),
      Node::While { cond, .. } => spaced("while", cond),
      Node::For { binder, source, .. } => format!("for {binder} in {source}"),
      Node::Def { name, params, returns, .. } if returns.is_empty() => {
        format!("def {name}({params})")
      }
      Node::Def { name, params, returns, .. } => format!("def {name}({params}) -> {returns}"),
    };
    self.line(level, &format!("{header}:"));
    if let Some(b) = node.body() {
      self.body(b, level + 1);
    }
  }
}

/// the keyword, then the rest if there is any.
fn spaced(keyword: &str, rest: &str) -> String {
  if rest.is_empty() { keyword.to_owned() } else { format!("{keyword} {rest}") }
}
