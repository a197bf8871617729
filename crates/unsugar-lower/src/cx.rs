//! The state of one lowering run.

use crate::pass::{Pass, Passes};
use rustc_hash::FxHashMap;
use unsugar_ir::Helpers;

/// Everything mutable during a run. Made fresh for every run and never shared.
#[derive(Debug)]
pub(crate) struct Cx<'a> {
  passes: &'a Passes,
  guard: usize,
  while_: usize,
  for_: usize,
  done: usize,
  functions: FxHashMap<String, usize>,
  /// one entry per enclosing loop. `None` for a loop whose `break` stays native.
  pub(crate) breaks: Vec<Option<String>>,
  /// the result holder of the function being lowered.
  pub(crate) ret: Option<String>,
  /// whether the expression phase is directly in a class body, where a `lambda` can not see the
  /// names the body binds.
  pub(crate) in_class: bool,
  pub(crate) helpers: Helpers,
}

impl<'a> Cx<'a> {
  pub(crate) fn new(passes: &'a Passes) -> Cx<'a> {
    Cx {
      passes,
      guard: 0,
      while_: 0,
      for_: 0,
      done: 0,
      functions: FxHashMap::default(),
      breaks: Vec::new(),
      ret: None,
      in_class: false,
      helpers: Helpers::default(),
    }
  }

  pub(crate) fn on(&self, p: Pass) -> bool {
    self.passes.contains(p)
  }

  pub(crate) fn fresh_guard(&mut self) -> String {
    let ret = format!("_guard{}", self.guard);
    self.guard += 1;
    log::debug!("fresh chain guard {ret}");
    ret
  }

  pub(crate) fn fresh_while(&mut self) -> String {
    let ret = format!("_while{}", self.while_);
    self.while_ += 1;
    log::debug!("fresh while flag {ret}");
    ret
  }

  /// returns the iterator and the flag.
  pub(crate) fn fresh_for(&mut self) -> (String, String) {
    let n = self.for_;
    self.for_ += 1;
    log::debug!("fresh for temporaries _iter{n} and _for{n}");
    (format!("_iter{n}"), format!("_for{n}"))
  }

  /// the flag that a lowered `for` sets when its source runs out.
  pub(crate) fn fresh_done(&mut self) -> String {
    let ret = format!("_done{}", self.done);
    self.done += 1;
    log::debug!("fresh for exhaustion flag {ret}");
    ret
  }

  /// returns the name of the lowered body and the name of the result holder.
  pub(crate) fn fresh_function(&mut self, name: &str) -> (String, String) {
    let n = self.functions.entry(name.to_owned()).or_default();
    let suffix = if *n == 0 { String::new() } else { n.to_string() };
    *n += 1;
    let ret = (format!("_{name}_body{suffix}"), format!("_{name}_ret{suffix}"));
    log::debug!("lower function {name} into {} with holder {}", ret.0, ret.1);
    ret
  }
}
