//! Tests for lowering `if`, `elif`, `else` chains.

use crate::check::{check_with, passes};
use proptest::prelude::*;
use rustc_hash::FxHashMap;
use unsugar_ir::Node;
use unsugar_lower::{Pass, Passes};

const CHAIN: &str = r"
if a:
  x = 1
elif b:
  x = 2
else:
  x = 3
";

#[test]
fn elif_and_else() {
  check_with(
    &passes([Pass::Elif, Pass::Else]),
    CHAIN,
    r"
_guard0 = True
if a:
  _guard0 = False
  x = 1
if _guard0 and (b):
  _guard0 = False
  x = 2
if _guard0:
  x = 3
",
  );
}

#[test]
fn comment_inside_chain() {
  check_with(
    &passes([Pass::Elif, Pass::Else]),
    r"
if x == 1:
  a()
# the two case
elif x == 2:
  b()
  # otherwise
else:
  c()
",
    r"
_guard0 = True
if x == 1:
  _guard0 = False
  a()
# the two case
if _guard0 and (x == 2):
  _guard0 = False
  b()
  # otherwise
if _guard0:
  c()
",
  );
}

#[test]
fn only_elif_takes_else_too() {
  check_with(
    &passes([Pass::Elif]),
    CHAIN,
    r"
_guard0 = True
if a:
  _guard0 = False
  x = 1
if _guard0 and (b):
  _guard0 = False
  x = 2
if _guard0:
  x = 3
",
  );
}

#[test]
fn only_else() {
  check_with(
    &passes([Pass::Else]),
    CHAIN,
    r"
_guard0 = True
if a:
  _guard0 = False
  x = 1
elif b:
  _guard0 = False
  x = 2
if _guard0:
  x = 3
",
  );
}

#[test]
fn only_elif_without_elifs() {
  let src = r"
if a:
  x = 1
else:
  x = 2
";
  check_with(&passes([Pass::Elif]), src, src);
}

#[test]
fn many_elifs() {
  check_with(
    &passes([Pass::Elif]),
    r"
if a:
  f()
elif b:
  g()
elif c:
  h()
",
    r"
_guard0 = True
if a:
  _guard0 = False
  f()
if _guard0 and (b):
  _guard0 = False
  g()
if _guard0 and (c):
  _guard0 = False
  h()
",
  );
}

#[test]
fn nested() {
  check_with(
    &passes([Pass::Else]),
    r"
if a:
  if b:
    x = 1
  else:
    x = 2
else:
  x = 3
",
    r"
_guard0 = True
if a:
  _guard0 = False
  _guard1 = True
  if b:
    _guard1 = False
    x = 1
  if _guard1:
    x = 2
if _guard0:
  x = 3
",
  );
}

#[test]
fn try_else_untouched() {
  let src = r"
try:
  f()
except E:
  g()
else:
  h()
";
  check_with(&passes([Pass::Elif, Pass::Else]), src, src);
}

#[test]
fn separate_chains() {
  check_with(
    &passes([Pass::Else]),
    r"
if a:
  f()
else:
  g()
if b:
  h()
else:
  i()
",
    r"
_guard0 = True
if a:
  _guard0 = False
  f()
if _guard0:
  g()
_guard1 = True
if b:
  _guard1 = False
  h()
if _guard1:
  i()
",
  );
}

/// a tiny interpreter for the programs made by `program`.
#[derive(Debug, Default)]
struct Interp {
  env: FxHashMap<String, bool>,
  hits: Vec<usize>,
}

impl Interp {
  fn cond(&self, s: &str) -> bool {
    match s.split_once(" and (") {
      Some((lhs, rhs)) => self.cond(lhs) && self.cond(rhs.strip_suffix(')').unwrap()),
      None => *self.env.get(s).unwrap_or_else(|| panic!("unbound: {s}")),
    }
  }

  fn body(&mut self, nodes: &[Node]) {
    // whether a branch of the current native chain ran.
    let mut done = true;
    for node in nodes {
      match node {
        Node::Stmt(s) if s.is_empty() => {}
        Node::Stmt(s) => {
          if let Some(k) = s.strip_prefix("hit(").and_then(|s| s.strip_suffix(')')) {
            self.hits.push(k.parse().unwrap());
          } else {
            let (lhs, rhs) = s.split_once(" = ").unwrap();
            self.env.insert(lhs.to_owned(), rhs == "True");
          }
        }
        Node::If { cond, body } => {
          done = self.cond(cond);
          if done {
            self.body(body);
          }
        }
        Node::Elif { cond, body } => {
          if !done && self.cond(cond) {
            done = true;
            self.body(body);
          }
        }
        Node::Else { body } => {
          if !done {
            done = true;
            self.body(body);
          }
        }
        _ => panic!("unexpected node: {node:?}"),
      }
    }
  }
}

const ELSE_HIT: usize = 99;

/// assigns the conditions, then runs a chain where branch `k` hits `k`.
fn program(conds: &[bool], has_else: bool) -> String {
  let mut ret = String::new();
  for (k, c) in conds.iter().enumerate() {
    let c = if *c { "True" } else { "False" };
    ret.push_str(&format!("c{k} = {c}\n"));
  }
  for k in 0..conds.len() {
    let kw = if k == 0 { "if" } else { "elif" };
    ret.push_str(&format!("{kw} c{k}:\n  hit({k})\n"));
  }
  if has_else {
    ret.push_str(&format!("else:\n  hit({ELSE_HIT})\n"));
  }
  ret
}

fn run(src: &str, passes: &Passes) -> Vec<usize> {
  let parse = unsugar_parse::get(src).unwrap();
  let lower = unsugar_lower::get(parse.nodes, passes).unwrap();
  let mut interp = Interp::default();
  interp.body(&lower.nodes);
  interp.hits
}

proptest! {
  #[test]
  fn exactly_the_same_branch(
    conds in prop::collection::vec(any::<bool>(), 1..6),
    has_else in any::<bool>(),
    which in 0..3usize,
  ) {
    let src = program(&conds, has_else);
    let ps = match which {
      0 => passes([Pass::Elif, Pass::Else]),
      1 => passes([Pass::Elif]),
      _ => passes([Pass::Else]),
    };
    let want = run(&src, &Passes::none());
    let got = run(&src, &ps);
    let first = conds.iter().position(|&c| c).or(has_else.then_some(ELSE_HIT));
    prop_assert_eq!(want.as_slice(), first.as_slice());
    prop_assert_eq!(got, want);
  }
}
