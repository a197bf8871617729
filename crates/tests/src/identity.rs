//! Tests that parsing then emitting, or lowering with nothing to lower, gives back the input.

use crate::check::{check_with, passes, round_trip};
use proptest::prelude::*;
use unsugar_lower::{Pass, Passes};

const PROGRAM: &str = r#"
import os

def f(a, b=1):
  x = a + b
  while x < 10:
    x += 1
  return x

class C(object):
  pass

try:
  f(1)
except ValueError as e:
  print(e)
finally:
  pass
assert f(1), "msg"
with open("f") as fh:
  for line in fh:
    if line:
      print(line)
    elif line == "":
      continue
    else:
      break
"#;

#[test]
fn program() {
  round_trip(PROGRAM);
}

#[test]
fn no_passes() {
  check_with(&Passes::none(), PROGRAM, PROGRAM);
}

#[test]
fn expr_passes_without_operators() {
  check_with(&passes([Pass::Not, Pass::In, Pass::And, Pass::Or]), PROGRAM, PROGRAM);
}

#[test]
fn four_space_indent() {
  round_trip(
    r"
if x:
    y = 1
    while y:
        y -= 1
",
  );
}

#[test]
fn tab_indent() {
  round_trip("def f():\n\treturn 1\n");
}

#[test]
fn one_line_compound() {
  round_trip(
    r"
if x: y = 1
while True: pass
def f(): return 3
",
  );
}

#[test]
fn comments_and_strings() {
  round_trip(
    r#"
# a comment: with a colon
x = "if y:"  # trailing: comment
s = 'not a block:'
"#,
  );
}

#[test]
fn empty() {
  round_trip("");
}

fn simple() -> impl Strategy<Value = String> {
  prop_oneof![
    Just("x = 1".to_owned()),
    Just("print(x)".to_owned()),
    Just("y = f(a, b)".to_owned()),
    Just("assert x, 'm'".to_owned()),
    Just("assert g(x)".to_owned()),
    Just("# note: x".to_owned()),
    Just(String::new()),
  ]
}

fn stmt() -> impl Strategy<Value = String> {
  prop_oneof![
    simple(),
    prop::collection::vec(simple(), 1..4).prop_map(|body| block("while cond():", &body)),
    prop::collection::vec(simple(), 1..4).prop_map(|body| block("def f(a, b):", &body)),
  ]
}

fn block(header: &str, body: &[String]) -> String {
  let mut ret = header.to_owned();
  // the first line of a body can not be blank.
  ret.push_str("\n  pass");
  // comments stay at the left edge, shallower than the body.
  for line in body {
    ret.push('\n');
    if !line.is_empty() && !line.starts_with('#') {
      ret.push_str("  ");
    }
    ret.push_str(line);
  }
  ret
}

proptest! {
  #[test]
  fn pass_through_programs(stmts in prop::collection::vec(stmt(), 1..8)) {
    round_trip(&stmts.join("\n"));
  }
}
