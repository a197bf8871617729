//! The expression phase: rewriting logical operators into calls to runtime helpers.
//!
//! Operands of `and` and `or` are wrapped in `lambda:` so the helpers can short-circuit. The
//! levels of the rewrite follow the precedence of the operators, loosest first:
//!
//! 1. sequences, split at punctuation and keywords that can not be inside an operand
//! 2. clauses, split at conditional expression and comprehension keywords
//! 3. `or`
//! 4. `and`
//! 5. leading `not`
//! 6. `in` and `not in`
//! 7. atoms, where every bracketed group is a new sequence

use crate::cx::Cx;
use crate::pass::Pass;
use crate::token::{self, Token};
use unsugar_ir::{Helper, Node};
use unsugar_scan::{find_word, strip_comment};

/// unmatched closing brackets are here since they end whatever they are in.
const SEP_PUNCTS: [&str; 22] = [
  ",", ":", ";", "=", ":=", "->", "+=", "-=", "*=", "/=", "//=", "%=", "**=", "@=", "&=", "|=",
  "^=", ">>=", "<<=", ")", "]", "}",
];

const SEP_WORDS: [&str; 20] = [
  "return", "yield", "raise", "del", "await", "assert", "from", "import", "global", "nonlocal",
  "lambda", "as", "pass", "continue", "break", "class", "with", "except", "async", "def",
];

pub(crate) fn body(cx: &mut Cx<'_>, nodes: &mut [Node]) {
  for node in nodes.iter_mut() {
    match node {
      Node::Stmt(s) => *s = text(cx, s),
      Node::KeywordStmt { expr, .. } | Node::Return(expr) => *expr = text(cx, expr),
      Node::Block { header, .. } => *header = text(cx, header),
      Node::If { cond, .. } | Node::Elif { cond, .. } | Node::While { cond, .. } => {
        *cond = text(cx, cond);
      }
      Node::For { source, .. } => *source = text(cx, source),
      Node::Def { params, .. } => *params = text(cx, params),
      Node::Assert(a) => {
        a.cond = text(cx, &a.cond);
        if let Some(msg) = &mut a.msg {
          *msg = text(cx, msg);
        }
      }
      Node::Else { .. } | Node::Break => {}
    }
    let in_class = match node {
      Node::Block { token, .. } => *token == "class",
      Node::Def { .. } => false,
      _ => cx.in_class,
    };
    if let Some(b) = node.body_mut() {
      let outer = std::mem::replace(&mut cx.in_class, in_class);
      body(cx, b);
      cx.in_class = outer;
    }
  }
}

/// Rewrites one piece of source text. A trailing comment is kept as is.
pub(crate) fn text(cx: &mut Cx<'_>, src: &str) -> String {
  let words = [(Pass::Not, "not"), (Pass::In, "in"), (Pass::And, "and"), (Pass::Or, "or")];
  if !words.iter().any(|&(p, w)| cx.on(p) && !find_word(src, w).is_empty()) {
    return src.to_owned();
  }
  let code = strip_comment(src);
  let toks = token::get(code);
  let mut ret = seq(cx, &toks);
  ret.push_str(&src[code.len()..]);
  ret
}

fn seq(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  // a comprehension binder like `k, v` is one piece.
  let mut in_binder = false;
  let is_sep = |t: &Token<'_>| match t {
    Token::Word("for") => {
      in_binder = true;
      false
    }
    Token::Word("in") => {
      in_binder = false;
      false
    }
    Token::Punct(p) => !in_binder && SEP_PUNCTS.contains(p),
    Token::Word(w) => SEP_WORDS.contains(w),
    _ => false,
  };
  join(cx, toks, is_sep, clause)
}

fn clause(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  let Some(idx) = toks.iter().position(|t| t.is_word("for")) else {
    return ternary(cx, toks);
  };
  let mut ret = ternary(cx, &toks[..idx]);
  // the binder ends at the first `in` after its `for`. that `in` is syntax, never an operator.
  let mut want_in = false;
  let is_sep = |t: &Token<'_>| {
    if t.is_word("for") {
      want_in = true;
      true
    } else if want_in && t.is_word("in") {
      want_in = false;
      true
    } else {
      t.is_word("if") || t.is_word("async")
    }
  };
  ret.push_str(&join(cx, &toks[idx..], is_sep, or_));
  ret
}

fn ternary(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  join(cx, toks, |t| t.is_word("if") || t.is_word("else"), or_)
}

fn or_(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  variadic(cx, toks, Pass::Or, Helper::Or, and_)
}

fn and_(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  variadic(cx, toks, Pass::And, Helper::And, not_)
}

/// `a <op> b <op> c` into `helper(lambda: a, lambda: b, lambda: c)`.
///
/// The operator stays native where a `lambda` would change what the operands bind or see: when an
/// operand has a `:=`, or directly in a class body.
fn variadic(
  cx: &mut Cx<'_>,
  toks: &[Token<'_>],
  pass: Pass,
  helper: Helper,
  f: fn(&mut Cx<'_>, &[Token<'_>]) -> String,
) -> String {
  let word = pass.keyword().to_ascii_lowercase();
  let (pieces, _) = split(toks, |t| t.is_word(&word));
  if pieces.len() < 2 || !cx.on(pass) || pieces.iter().any(|p| is_empty(p)) {
    return join(cx, toks, |t| t.is_word(&word), f);
  }
  if cx.in_class || has_walrus(toks) {
    log::debug!("keep native `{word}`");
    return join(cx, toks, |t| t.is_word(&word), f);
  }
  cx.helpers.insert(helper);
  let args: Vec<_> = pieces.iter().map(|p| format!("lambda: {}", f(cx, p).trim())).collect();
  surround(toks, &format!("{helper}({})", args.join(", ")))
}

fn not_(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  let mut count = 0usize;
  let mut rest = 0usize;
  for (idx, t) in toks.iter().enumerate() {
    if t.is_word("not") {
      count += 1;
      rest = idx + 1;
    } else if !t.is_space() {
      break;
    }
  }
  if count == 0 || !cx.on(Pass::Not) || is_empty(&toks[rest..]) {
    return in_(cx, toks);
  }
  cx.helpers.insert(Helper::Not);
  let mut ret = in_(cx, &toks[rest..]).trim().to_owned();
  for _ in 0..count {
    ret = format!("{}({ret})", Helper::Not);
  }
  surround(toks, &ret)
}

fn in_(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  // each operator is the range of its tokens, and whether it is `not in`.
  let mut ops = Vec::<(usize, usize, bool)>::new();
  for (idx, t) in toks.iter().enumerate() {
    if !t.is_word("in") {
      continue;
    }
    let prev = toks[..idx].iter().rposition(|t| !t.is_space());
    match prev {
      Some(p) if toks[p].is_word("not") => ops.push((p, idx + 1, true)),
      _ => ops.push((idx, idx + 1, false)),
    }
  }
  let mut operands = Vec::<&[Token<'_>]>::with_capacity(ops.len() + 1);
  let mut prev = 0usize;
  for &(start, end, _) in &ops {
    operands.push(&toks[prev..start]);
    prev = end;
  }
  operands.push(&toks[prev..]);
  if ops.is_empty() || !cx.on(Pass::In) || operands.iter().any(|p| is_empty(p)) {
    let mut ret = String::new();
    let mut prev = 0usize;
    for &(start, end, _) in &ops {
      ret.push_str(&atom(cx, &toks[prev..start]));
      token::render(&toks[start..end], &mut ret);
      prev = end;
    }
    ret.push_str(&atom(cx, &toks[prev..]));
    return ret;
  }
  let mut iter = operands.into_iter();
  let mut ret = iter.next().map(|p| atom(cx, p).trim().to_owned()).unwrap_or_default();
  for ((_, _, negated), rhs) in ops.into_iter().zip(iter) {
    let helper = if negated { Helper::NotIn } else { Helper::In };
    cx.helpers.insert(helper);
    ret = format!("{helper}({ret}, {})", atom(cx, rhs).trim());
  }
  surround(toks, &ret)
}

fn atom(cx: &mut Cx<'_>, toks: &[Token<'_>]) -> String {
  let mut ret = String::new();
  for t in toks {
    match t {
      Token::Group { open, inner, close } => {
        ret.push_str(open);
        ret.push_str(&seq(cx, inner));
        if let Some(close) = close {
          ret.push_str(close);
        }
      }
      _ => token::render(std::slice::from_ref(t), &mut ret),
    }
  }
  ret
}

/// splits at every separator, returning the pieces and the separators.
fn split<'t, 'a, P>(
  toks: &'t [Token<'a>],
  mut is_sep: P,
) -> (Vec<&'t [Token<'a>]>, Vec<&'t Token<'a>>)
where
  P: FnMut(&Token<'a>) -> bool,
{
  let mut pieces = Vec::<&'t [Token<'a>]>::new();
  let mut seps = Vec::<&'t Token<'a>>::new();
  let mut prev = 0usize;
  for (idx, t) in toks.iter().enumerate() {
    if is_sep(t) {
      pieces.push(&toks[prev..idx]);
      seps.push(t);
      prev = idx + 1;
    }
  }
  pieces.push(&toks[prev..]);
  (pieces, seps)
}

/// rewrites each piece between separators with `f`, keeping the separators as they were.
fn join<'a, P>(
  cx: &mut Cx<'_>,
  toks: &[Token<'a>],
  is_sep: P,
  f: fn(&mut Cx<'_>, &[Token<'_>]) -> String,
) -> String
where
  P: FnMut(&Token<'a>) -> bool,
{
  let (pieces, seps) = split(toks, is_sep);
  let mut ret = String::new();
  let mut seps = seps.into_iter();
  for piece in pieces {
    ret.push_str(&f(cx, piece));
    if let Some(sep) = seps.next() {
      token::render(std::slice::from_ref(sep), &mut ret);
    }
  }
  ret
}

/// whether there is a `:=` anywhere, even in brackets. it binds in the enclosing scope from inside
/// a comprehension too.
fn has_walrus(toks: &[Token<'_>]) -> bool {
  toks.iter().any(|t| match t {
    Token::Punct(p) => *p == ":=",
    Token::Group { inner, .. } => has_walrus(inner),
    _ => false,
  })
}

fn is_empty(toks: &[Token<'_>]) -> bool {
  toks.iter().all(Token::is_space)
}

/// puts the whitespace around the tokens around the replacement.
fn surround(toks: &[Token<'_>], replacement: &str) -> String {
  let mut raw = String::new();
  token::render(toks, &mut raw);
  let lead = &raw[..raw.len() - raw.trim_start().len()];
  let trail = &raw[raw.trim_end().len()..];
  format!("{lead}{replacement}{trail}")
}
