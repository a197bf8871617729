//! Lower high-level constructs into primitive conditionals, loops, and runtime helper calls.
//!
//! There are two phases. The statement phase restructures the tree. The expression phase then
//! rewrites the text of every expression in place. Each pass may be turned off independently.

#![deny(clippy::pedantic, missing_debug_implementations, rust_2018_idioms)]

mod cx;
mod error;
mod logic;
mod pass;
mod stmt;
mod token;

use unsugar_ir::{Body, Helpers};

pub use error::Error;
pub use pass::{Pass, PassError, Passes};

/// The result of lowering.
#[derive(Debug)]
pub struct Lower {
  /// The rewritten nodes.
  pub nodes: Body,
  /// The runtime helpers the rewritten nodes call.
  pub helpers: Helpers,
}

/// Lowers the nodes, running only the enabled passes.
///
/// # Errors
///
/// If a `break` is not inside any loop and breaks are being lowered.
pub fn get(nodes: Body, passes: &Passes) -> Result<Lower, Error> {
  let mut cx = cx::Cx::new(passes);
  let mut nodes = if passes.iter().any(|p| !p.is_expr()) {
    log::info!("statement phase");
    stmt::body(&mut cx, nodes)?
  } else {
    nodes
  };
  if passes.iter().any(Pass::is_expr) {
    log::info!("expression phase");
    logic::body(&mut cx, &mut nodes);
  }
  Ok(Lower { nodes, helpers: cx.helpers })
}
