//! Splitting expression text into a shallow tree of tokens, where each bracketed group is one
//! token.

use unsugar_scan::{classify, ident};

/// multi-character operators, longest first.
const OPS: [&str; 24] = [
  "**=", "//=", ">>=", "<<=", "...", "==", "!=", "<=", ">=", ":=", "->", "+=", "-=", "*=", "/=",
  "%=", "&=", "|=", "^=", "@=", "**", "//", "<<", ">>",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
  Space(&'a str),
  Word(&'a str),
  /// a quoted literal or a comment.
  Lit(&'a str),
  Punct(&'a str),
  Group {
    open: &'a str,
    inner: Vec<Token<'a>>,
    /// `None` if the group is still open at the end of the text.
    close: Option<&'a str>,
  },
}

impl Token<'_> {
  pub(crate) fn is_word(&self, w: &str) -> bool {
    matches!(self, Token::Word(s) if *s == w)
  }

  pub(crate) fn is_space(&self) -> bool {
    matches!(self, Token::Space(_))
  }
}

pub(crate) fn get(src: &str) -> Vec<Token<'_>> {
  let mut stack = Vec::<(&str, Vec<Token<'_>>)>::new();
  let mut cur = Vec::<Token<'_>>::new();
  for run in classify(src) {
    let text = &src[run.range];
    if !run.is_code {
      cur.push(Token::Lit(text));
      continue;
    }
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
      let len = if c.is_whitespace() {
        prefix_len(rest, char::is_whitespace)
      } else if ident::is_continue(c) {
        prefix_len(rest, ident::is_continue)
      } else {
        OPS.iter().find(|op| rest.starts_with(*op)).map_or(c.len_utf8(), |op| op.len())
      };
      let (tok, tail) = rest.split_at(len);
      rest = tail;
      match tok {
        "(" | "[" | "{" => stack.push((tok, std::mem::take(&mut cur))),
        ")" | "]" | "}" => match stack.pop() {
          Some((open, outer)) => {
            let inner = std::mem::replace(&mut cur, outer);
            cur.push(Token::Group { open, inner, close: Some(tok) });
          }
          None => cur.push(Token::Punct(tok)),
        },
        _ if c.is_whitespace() => cur.push(Token::Space(tok)),
        _ if ident::is_continue(c) => cur.push(Token::Word(tok)),
        _ => cur.push(Token::Punct(tok)),
      }
    }
  }
  while let Some((open, outer)) = stack.pop() {
    let inner = std::mem::replace(&mut cur, outer);
    cur.push(Token::Group { open, inner, close: None });
  }
  cur
}

fn prefix_len<F>(s: &str, f: F) -> usize
where
  F: Fn(char) -> bool,
{
  s.char_indices().find(|&(_, c)| !f(c)).map_or(s.len(), |(idx, _)| idx)
}

/// the text of the tokens, exactly as they were.
pub(crate) fn render(toks: &[Token<'_>], out: &mut String) {
  for tok in toks {
    match tok {
      Token::Space(s) | Token::Word(s) | Token::Lit(s) | Token::Punct(s) => out.push_str(s),
      Token::Group { open, inner, close } => {
        out.push_str(open);
        render(inner, out);
        if let Some(close) = close {
          out.push_str(close);
        }
      }
    }
  }
}
