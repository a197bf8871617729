//! The state of the parser.

use rustc_hash::FxHashMap;
use unsugar_ir::is_trivia;

#[derive(Debug)]
pub(crate) struct St<'a> {
  lines: Vec<&'a str>,
  idx: usize,
  functions: FxHashMap<String, usize>,
  indent: Option<String>,
}

impl<'a> St<'a> {
  pub(crate) fn new(src: &'a str) -> St<'a> {
    St { lines: src.split('\n').collect(), idx: 0, functions: FxHashMap::default(), indent: None }
  }

  /// returns the 0-based index of the line and the line.
  pub(crate) fn next(&mut self) -> Option<(usize, &'a str)> {
    let line = self.lines.get(self.idx).copied()?;
    let ret = (self.idx, line);
    self.idx += 1;
    Some(ret)
  }

  pub(crate) fn rewind(&mut self) {
    self.idx = self.idx.saturating_sub(1);
  }

  /// returns the first remaining line that is not trivia, without consuming anything.
  pub(crate) fn peek_content(&self) -> Option<&'a str> {
    self.lines[self.idx..].iter().copied().find(|line| !is_trivia(line))
  }

  pub(crate) fn num_lines(&self) -> usize {
    self.lines.len()
  }

  pub(crate) fn function(&mut self, name: &str, line: usize) {
    if !self.functions.contains_key(name) {
      self.functions.insert(name.to_owned(), line);
    }
  }

  /// the first unit seen wins.
  pub(crate) fn indent_unit(&mut self, unit: &str) {
    if self.indent.is_none() && !unit.is_empty() {
      self.indent = Some(unit.to_owned());
    }
  }

  pub(crate) fn finish(self) -> (FxHashMap<String, usize>, Option<String>) {
    (self.functions, self.indent)
  }
}

pub(crate) fn indentation(line: &str) -> usize {
  line.len() - line.trim_start_matches([' ', '\t']).len()
}
