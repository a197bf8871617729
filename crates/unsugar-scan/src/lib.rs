//! Scanning raw text into code, quoted literals, and comments.
//!
//! Every later text search goes through [`classify`], so keyword and operator rewriting never
//! touches the inside of a literal or a comment.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

pub mod ident;
mod st;

use st::St;
use text_size::{TextRange, TextSize};

/// A maximal run of text of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
  /// Whether this is live code, as opposed to a quoted literal or a comment.
  pub is_code: bool,
  /// Where the run is.
  pub range: TextRange,
}

/// Splits the text into maximal runs of code and non-code.
///
/// A quoted literal (single or double quotes, where a backslash escapes the next byte) is one
/// non-code run, including its quotes. An unquoted `#` starts a comment that extends to the end,
/// so it is always the final run. An unclosed literal also extends to the end. There are never
/// empty runs.
#[must_use]
pub fn classify(src: &str) -> Vec<Run> {
  let mut st = St::new(src);
  let mut ret = Vec::<Run>::new();
  loop {
    let code = st.mark();
    st.bump_while(|b| !matches!(b, b'\'' | b'"' | b'#'));
    if let Some(range) = st.non_empty_since(code) {
      ret.push(Run { is_code: true, range });
    }
    let Some(b) = st.cur() else { break };
    let other = st.mark();
    st.bump();
    if b == b'#' {
      st.bump_while(|_| true);
    } else {
      quoted(&mut st, b);
    }
    if let Some(range) = st.non_empty_since(other) {
      ret.push(Run { is_code: false, range });
    }
  }
  ret
}

fn quoted(st: &mut St<'_>, delim: u8) {
  while let Some(b) = st.cur() {
    st.bump();
    if b == b'\\' {
      st.bump();
    } else if b == delim {
      return;
    }
  }
}

/// Returns the code runs of the text, paired with their starting offset.
fn code_runs(src: &str) -> impl Iterator<Item = (usize, &str)> {
  classify(src).into_iter().filter(|run| run.is_code).map(move |run| {
    let start = usize::from(run.range.start());
    (start, &src[run.range])
  })
}

/// Returns the longest prefix of the line that is an identifier, or the empty string.
///
/// ```text
/// leading_token("if(x):") == "if"
/// ```
#[must_use]
pub fn leading_token(line: &str) -> &str {
  let mut iter = line.char_indices();
  match iter.next() {
    Some((_, c)) if ident::is_start(c) => {}
    Some(_) | None => return "",
  }
  let end = iter.find(|&(_, c)| !ident::is_continue(c)).map_or(line.len(), |(idx, _)| idx);
  &line[..end]
}

/// Returns the position just past the first comma outside of any brackets, quoted literals, and
/// comments.
///
/// This is how an assertion's condition is split from its message.
#[must_use]
pub fn find_top_level_comma(src: &str) -> Option<TextSize> {
  let mut depth = 0usize;
  for (start, code) in code_runs(src) {
    for (idx, c) in code.char_indices() {
      match c {
        '(' | '[' | '{' => depth += 1,
        ')' | ']' | '}' => depth = depth.saturating_sub(1),
        ',' if depth == 0 => return Some(st::size(start + idx + 1)),
        _ => {}
      }
    }
  }
  None
}

/// Removes the last occurrence of `token` in code (and everything after it, including a
/// comment), then trims. If there is no such occurrence, only trims.
///
/// ```text
/// strip_trailing_token("for x in range(3):  # loop", ":") == "for x in range(3)"
/// ```
#[must_use]
pub fn strip_trailing_token<'a>(src: &'a str, token: &str) -> &'a str {
  let last = code_runs(src).filter_map(|(start, code)| Some(start + code.rfind(token)?)).last();
  match last {
    Some(end) => src[..end].trim(),
    None => src.trim(),
  }
}

/// Returns the text before a comment, if any.
#[must_use]
pub fn strip_comment(src: &str) -> &str {
  let end = classify(src)
    .into_iter()
    .find(|run| !run.is_code && src[run.range].starts_with('#'))
    .map_or(src.len(), |run| usize::from(run.range.start()));
  &src[..end]
}

/// Returns whether the code of this line ends with a block-opening `:`.
#[must_use]
pub fn ends_with_block_colon(src: &str) -> bool {
  strip_comment(src).trim_end().ends_with(':')
}

/// Returns the offsets of every whole-word occurrence of `word` in code.
#[must_use]
pub fn find_word(src: &str, word: &str) -> Vec<TextSize> {
  let mut ret = Vec::<TextSize>::new();
  if word.is_empty() {
    return ret;
  }
  for (start, code) in code_runs(src) {
    for (idx, _) in code.match_indices(word) {
      let before = code[..idx].chars().next_back();
      let after = code[idx + word.len()..].chars().next();
      if before.is_some_and(ident::is_continue) || after.is_some_and(ident::is_continue) {
        continue;
      }
      ret.push(st::size(start + idx));
    }
  }
  ret
}

/// Splits the text at every whole-word occurrence of `word` in code. The pieces are not trimmed.
///
/// ```text
/// split_word("k, v in d.items()", "in") == ["k, v ", " d.items()"]
/// ```
#[must_use]
pub fn split_word<'a>(src: &'a str, word: &str) -> Vec<&'a str> {
  let mut ret = Vec::<&'a str>::new();
  let mut prev = 0usize;
  for pos in find_word(src, word) {
    let pos = usize::from(pos);
    ret.push(&src[prev..pos]);
    prev = pos + word.len();
  }
  ret.push(&src[prev..]);
  ret
}
