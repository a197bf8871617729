//! The state of the scanner.

use drop_bomb::DebugDropBomb;
use text_size::{TextRange, TextSize};

#[derive(Debug)]
pub(crate) struct St<'a> {
  s: &'a str,
  idx: usize,
}

impl<'a> St<'a> {
  pub(crate) fn new(s: &'a str) -> St<'a> {
    St { s, idx: 0 }
  }

  /// does nothing at the end.
  pub(crate) fn bump(&mut self) {
    if self.idx < self.s.len() {
      self.idx += 1;
    }
  }

  pub(crate) fn cur(&self) -> Option<u8> {
    self.s.as_bytes().get(self.idx).copied()
  }

  pub(crate) fn bump_while<F>(&mut self, f: F)
  where
    F: Fn(u8) -> bool,
  {
    while let Some(b) = self.cur() {
      if f(b) {
        self.bump();
      } else {
        break;
      }
    }
  }

  pub(crate) fn mark(&self) -> Marker {
    Marker { bomb: DebugDropBomb::new("must be passed to a `St` method"), idx: self.idx }
  }

  /// returns `None` iff we did not bump since the marker.
  pub(crate) fn non_empty_since(&self, mut m: Marker) -> Option<TextRange> {
    m.bomb.defuse();
    (self.idx > m.idx).then(|| TextRange::new(size(m.idx), size(self.idx)))
  }
}

pub(crate) struct Marker {
  bomb: DebugDropBomb,
  idx: usize,
}

/// # Panics
///
/// If the text is longer than `u32::MAX` bytes.
pub(crate) fn size(idx: usize) -> TextSize {
  TextSize::try_from(idx).expect("text should fit in a u32")
}
