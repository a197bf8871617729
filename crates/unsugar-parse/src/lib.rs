//! Parse source text into a tree, using indentation to delimit nesting.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

mod error;
mod internal;
mod st;

use rustc_hash::FxHashMap;
use unsugar_ir::Body;

pub use error::Error;

/// The result of parsing.
#[derive(Debug)]
pub struct Parse {
  /// The top-level nodes.
  pub nodes: Body,
  /// The declared function names, each with the 1-based line of its first declaration.
  pub functions: FxHashMap<String, usize>,
  /// The whitespace the first nested block adds over its parent, if there was a nested block.
  pub indent: Option<String>,
}

/// Parses the source text.
///
/// # Errors
///
/// If a line ends in a block-opening `:` but does not start with a block keyword, if a `for`
/// header is not `<binder> in <source>`, or if a block has no body.
pub fn get(src: &str) -> Result<Parse, Error> {
  let mut st = st::St::new(src);
  let nodes = internal::root(&mut st)?;
  log::info!("parsed {} lines into {} top-level nodes", st.num_lines(), nodes.len());
  let (functions, indent) = st.finish();
  Ok(Parse { nodes, functions, indent })
}
