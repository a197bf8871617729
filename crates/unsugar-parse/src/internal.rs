//! The internal impl.

use crate::error::{Error, Kind};
use crate::st::{St, indentation};
use unsugar_ir::{Assert, Body, Node, is_trivia};
use unsugar_scan::{
  classify, ends_with_block_colon, find_top_level_comma, leading_token, split_word,
  strip_trailing_token,
};

/// words that may introduce a generic `<keyword> <header>:` block.
const BLOCK_KEYWORDS: [&str; 8] =
  ["async", "case", "class", "except", "finally", "match", "try", "with"];

pub(crate) fn root(st: &mut St<'_>) -> Result<Body, Error> {
  let baseline = st.peek_content().map_or(0, indentation);
  block(st, baseline)
}

/// the body of the block opened on line `idx`, whose opener is indented by `parent`.
fn body(st: &mut St<'_>, idx: usize, parent: usize) -> Result<Body, Error> {
  let err = Error { line: idx + 1, kind: Kind::EmptyBlock };
  let Some(first) = st.peek_content() else { return Err(err) };
  let baseline = indentation(first);
  if baseline <= parent {
    return Err(err);
  }
  st.indent_unit(&first[parent..baseline]);
  block(st, baseline)
}

fn block(st: &mut St<'_>, baseline: usize) -> Result<Body, Error> {
  let mut ret = Body::new();
  while let Some((idx, line)) = st.next() {
    // trivia never ends a block. comments keep their own indentation.
    if is_trivia(line) {
      ret.push(Node::stmt(if line.trim().is_empty() { "" } else { line }));
      continue;
    }
    let indent = indentation(line);
    if indent < baseline {
      st.rewind();
      break;
    }
    ret.push(node(st, idx, &line[indent..], indent)?);
  }
  Ok(ret)
}

fn node(st: &mut St<'_>, idx: usize, text: &str, indent: usize) -> Result<Node, Error> {
  let token = leading_token(text);
  let rest = &text[token.len()..];
  let opens = ends_with_block_colon(text);
  let ret = match token {
    "if" | "elif" | "while" if opens => {
      let cond = strip_trailing_token(rest, ":").to_owned();
      let body = body(st, idx, indent)?;
      match token {
        "if" => Node::If { cond, body },
        "elif" => Node::Elif { cond, body },
        _ => Node::While { cond, body },
      }
    }
    "else" if opens => Node::Else { body: body(st, idx, indent)? },
    "for" if opens => {
      let header = strip_trailing_token(rest, ":");
      let &[binder, source] = split_word(header, "in").as_slice() else {
        return Err(Error { line: idx + 1, kind: Kind::ForNotTwoParts });
      };
      let binder = binder.trim().to_owned();
      let source = source.trim().to_owned();
      Node::For { binder, source, body: body(st, idx, indent)? }
    }
    "def" if opens => {
      let header = strip_trailing_token(rest, ":");
      let (name, params, after) = match header.find('(') {
        Some(open) => {
          let (params, after) = param_text(&header[open + 1..]);
          (header[..open].trim(), params, after)
        }
        None => (header, "", ""),
      };
      let returns = after.trim().strip_prefix("->").unwrap_or_default().trim();
      st.function(name, idx + 1);
      log::debug!("found function `{name}` on line {}", idx + 1);
      let (name, params, returns) = (name.to_owned(), params.to_owned(), returns.to_owned());
      Node::Def { name, params, returns, body: body(st, idx, indent)? }
    }
    "return" => Node::Return(rest.trim().to_owned()),
    "assert" => {
      let rest = rest.trim();
      let assert = match find_top_level_comma(rest) {
        Some(pos) => {
          let pos = usize::from(pos);
          let cond = rest[..pos - 1].trim().to_owned();
          Assert { cond, msg: Some(rest[pos..].trim().to_owned()) }
        }
        None => Assert { cond: rest.to_owned(), msg: None },
      };
      Node::Assert(assert)
    }
    "break" => Node::Break,
    _ if opens => {
      if !BLOCK_KEYWORDS.contains(&token) {
        return Err(Error { line: idx + 1, kind: Kind::NotBlockKeyword(token.to_owned()) });
      }
      let header = strip_trailing_token(rest, ":").to_owned();
      Node::Block { token: token.to_owned(), header, body: body(st, idx, indent)? }
    }
    _ => Node::stmt(text),
  };
  Ok(ret)
}

/// `s` is everything after an opening `(`. returns everything up to the matching `)`, and
/// everything after it.
fn param_text(s: &str) -> (&str, &str) {
  let mut depth = 0usize;
  for run in classify(s).into_iter().filter(|run| run.is_code) {
    let start = usize::from(run.range.start());
    for (idx, c) in s[run.range].char_indices() {
      match c {
        '(' | '[' | '{' => depth += 1,
        ')' if depth == 0 => return (&s[..start + idx], &s[start + idx + 1..]),
        ')' | ']' | '}' => depth = depth.saturating_sub(1),
        _ => {}
      }
    }
  }
  s.rfind(')').map_or((s, ""), |end| (&s[..end], &s[end + 1..]))
}
