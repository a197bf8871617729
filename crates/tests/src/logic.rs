//! Tests for lowering logical operators into helper calls.

use crate::check::{check_with, expr_passes, lower, passes};
use unsugar_ir::Helper;
use unsugar_lower::{Pass, Passes};

fn check(src: &str, want: &str) {
  check_with(&expr_passes(), src, want);
}

/// tests that lowering `src` uses exactly the `want` helpers.
fn check_helpers(ps: &Passes, src: &str, want: &[Helper]) {
  let (_, helpers) = lower(ps, src).unwrap();
  let got: Vec<_> = helpers.iter().collect();
  assert_eq!(want, got.as_slice());
}

#[test]
fn and() {
  check("x = a and b", "x = _and(lambda: a, lambda: b)");
}

#[test]
fn or_many() {
  check("x = a or b or c", "x = _or(lambda: a, lambda: b, lambda: c)");
}

#[test]
fn and_binds_tighter_than_or() {
  check(
    "x = a and b or c and d",
    "x = _or(lambda: _and(lambda: a, lambda: b), lambda: _and(lambda: c, lambda: d))",
  );
  check("x = a or b and c", "x = _or(lambda: a, lambda: _and(lambda: b, lambda: c))");
}

#[test]
fn not_many() {
  check("x = not not y", "x = _not(_not(y))");
}

#[test]
fn not_binds_looser_than_in() {
  check("x = not a in b", "x = _not(_in(a, b))");
}

#[test]
fn not_in() {
  check("x = a not in b", "x = _not_in(a, b)");
}

#[test]
fn is_not() {
  check("x = a is not b", "x = a is not b");
  check_helpers(&expr_passes(), "x = a is not b", &[]);
}

#[test]
fn parens() {
  check("x = (a or b) and c", "x = _and(lambda: (_or(lambda: a, lambda: b)), lambda: c)");
}

#[test]
fn call_args() {
  check("f(a or b, c, k=not d)", "f(_or(lambda: a, lambda: b), c, k=_not(d))");
}

#[test]
fn dict() {
  check("d = {k: a and b}", "d = {k: _and(lambda: a, lambda: b)}");
}

#[test]
fn lambda() {
  check("f = lambda x: x or y", "f = lambda x: _or(lambda: x, lambda: y)");
}

#[test]
fn conditional_expression() {
  check("z = a if b and c else d", "z = a if _and(lambda: b, lambda: c) else d");
}

#[test]
fn comprehension() {
  check("y = [v for v in xs if v in ys]", "y = [v for v in xs if _in(v, ys)]");
  check("y = {k: v for k, v in d if k not in s}", "y = {k: v for k, v in d if _not_in(k, s)}");
}

#[test]
fn strings_and_comments() {
  check(r#"x = "a and b"  # c or d"#, r#"x = "a and b"  # c or d"#);
  check("x = a or b  # a or b", "x = _or(lambda: a, lambda: b)  # a or b");
}

#[test]
fn conditions() {
  check(
    r"
if a and b:
  pass
elif not c:
  pass
while x in y:
  pass
",
    r"
if _and(lambda: a, lambda: b):
  pass
elif _not(c):
  pass
while _in(x, y):
  pass
",
  );
}

#[test]
fn return_and_params() {
  check(
    r"
def f(x=a or b):
  return not x
",
    r"
def f(x=_or(lambda: a, lambda: b)):
  return _not(x)
",
  );
}

#[test]
fn for_source() {
  check(
    r"
for x in a or b:
  pass
",
    r"
for x in _or(lambda: a, lambda: b):
  pass
",
  );
}

#[test]
fn only_and() {
  check_with(&passes([Pass::And]), "x = not a and b", "x = _and(lambda: not a, lambda: b)");
  check_helpers(&passes([Pass::And]), "x = not a and b or c in d", &[Helper::And]);
}

#[test]
fn only_not() {
  check_with(&passes([Pass::Not]), "x = not a and b", "x = _not(a) and b");
}

#[test]
fn helpers() {
  check_helpers(
    &expr_passes(),
    "x = a or (b and not c in d)",
    &[Helper::Not, Helper::In, Helper::And, Helper::Or],
  );
  check_helpers(&expr_passes(), "x = a not in b", &[Helper::NotIn]);
  check_helpers(&expr_passes(), "x = [a for a in b]", &[]);
}

#[test]
fn word_inside_identifier() {
  check("x = order and index", "x = _and(lambda: order, lambda: index)");
  check("x = android", "x = android");
}

#[test]
fn walrus_keeps_native_operator() {
  let src = r#"
if (m := re.match(r"(\d+)", s)) and m.group(1):
  print(m.group(1))
"#;
  check(src, src);
  check_helpers(&expr_passes(), src, &[]);
}

#[test]
fn walrus_operands_still_lowered() {
  check("x = (y := a) and (b or c)", "x = (y := a) and (_or(lambda: b, lambda: c))");
  check("x = [y := f(v) for v in vs] or z", "x = [y := f(v) for v in vs] or z");
}

#[test]
fn class_body_keeps_native_operator() {
  check(
    r"
class C:
  a = None
  b = a or 5
  c = not a
  def f(self, x=a or 1):
    return x or self.b
",
    r"
class C:
  a = None
  b = a or 5
  c = _not(a)
  def f(self, x=a or 1):
    return _or(lambda: x, lambda: self.b)
",
  );
}
