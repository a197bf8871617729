//! The statement phase: restructuring assertions, chains, loops, breaks, and functions.

use crate::cx::Cx;
use crate::error::{Error, Kind};
use crate::pass::Pass;
use unsugar_ir::{Assert, Body, Expr, Node, end_of_content};
use unsugar_scan::strip_comment;

pub(crate) fn body(cx: &mut Cx<'_>, nodes: Body) -> Result<Body, Error> {
  let mut ret = Body::with_capacity(nodes.len());
  let mut iter = nodes.into_iter().peekable();
  while let Some(node) = iter.next() {
    match node {
      Node::Stmt(_) | Node::KeywordStmt { .. } => ret.push(node),
      Node::Block { token, header, body: b } => {
        ret.push(Node::Block { token, header, body: body(cx, b)? });
      }
      Node::If { cond, body: b } => {
        let mut elifs = Vec::<(Expr, Body)>::new();
        while let Some(Node::Elif { cond, body }) =
          iter.next_if(|n| matches!(n, Node::Elif { .. }))
        {
          elifs.push((cond, body));
        }
        let else_ = next_else(&mut iter);
        chain(cx, &mut ret, (cond, b), elifs, else_)?;
      }
      // not after an `if`, like the `else` of a `try`.
      Node::Elif { cond, body: b } => ret.push(Node::Elif { cond, body: body(cx, b)? }),
      Node::Else { body: b } => ret.push(Node::Else { body: body(cx, b)? }),
      Node::While { cond, body: b } => {
        let else_ = next_else(&mut iter);
        while_(cx, &mut ret, cond, b, else_)?;
      }
      Node::For { binder, source, body: b } => {
        let else_ = next_else(&mut iter);
        for_(cx, &mut ret, (binder, source), b, else_)?;
      }
      Node::Break => break_(cx, &mut ret)?,
      Node::Return(e) => return_(cx, &mut ret, e),
      Node::Def { name, params, returns, body: b } => {
        def(cx, &mut ret, (name, params, returns), b)?;
      }
      Node::Assert(a) => assert_(cx, &mut ret, a),
    }
  }
  Ok(ret)
}

fn assert_(cx: &Cx<'_>, ret: &mut Body, a: Assert) {
  if !cx.on(Pass::Assert) {
    ret.push(Node::Assert(a));
    return;
  }
  let cond = strip_comment(&a.cond).trim_end();
  log::debug!("lower assert {cond}");
  let raise = match &a.msg {
    None => Node::stmt("raise AssertionError"),
    Some(msg) => Node::stmt(format!("raise AssertionError({})", strip_comment(msg).trim_end())),
  };
  ret.push(Node::If { cond: format!("not ({cond})"), body: vec![raise] });
}

/// a maximal `if`, `elif`*, `else`? run.
fn chain(
  cx: &mut Cx<'_>,
  ret: &mut Body,
  (cond, b): (Expr, Body),
  elifs: Vec<(Expr, Body)>,
  else_: Option<Body>,
) -> Result<(), Error> {
  let lower_elif = cx.on(Pass::Elif) && !elifs.is_empty();
  // an `else` can not follow a flattened chain, so it is flattened too.
  let lower_else = else_.is_some() && (cx.on(Pass::Else) || lower_elif);
  if !lower_elif && !lower_else {
    ret.push(Node::If { cond, body: body(cx, b)? });
    for (cond, b) in elifs {
      ret.push(Node::Elif { cond, body: body(cx, b)? });
    }
    if let Some(b) = else_ {
      ret.push(Node::Else { body: body(cx, b)? });
    }
    return Ok(());
  }
  let guard = cx.fresh_guard();
  ret.push(Node::stmt(format!("{guard} = True")));
  ret.push(Node::If { cond, body: guarded(cx, &guard, b)? });
  for (cond, b) in elifs {
    let b = guarded(cx, &guard, b)?;
    if lower_elif {
      ret.push(Node::If { cond: format!("{guard} and ({cond})"), body: b });
    } else {
      ret.push(Node::Elif { cond, body: b });
    }
  }
  if let Some(b) = else_ {
    ret.push(Node::If { cond: guard, body: body(cx, b)? });
  }
  Ok(())
}

/// clears the guard, then runs the body.
fn guarded(cx: &mut Cx<'_>, guard: &str, b: Body) -> Result<Body, Error> {
  let mut ret = vec![Node::stmt(format!("{guard} = False"))];
  ret.extend(body(cx, b)?);
  Ok(ret)
}

/// the `else` right after, if any.
fn next_else<I>(iter: &mut std::iter::Peekable<I>) -> Option<Body>
where
  I: Iterator<Item = Node>,
{
  match iter.next_if(|n| matches!(n, Node::Else { .. })) {
    Some(Node::Else { body }) => Some(body),
    _ => None,
  }
}

/// lowers the body of a loop whose `break` clears `target`, or stays native if `None`.
fn in_loop(cx: &mut Cx<'_>, target: Option<String>, b: Body) -> Result<Body, Error> {
  cx.breaks.push(target);
  let ret = body(cx, b);
  cx.breaks.pop();
  ret
}

/// whether a `break` in this body would exit the loop owning the body.
fn has_break(nodes: &[Node]) -> bool {
  nodes.iter().any(|node| match node {
    Node::Break => true,
    Node::While { .. } | Node::For { .. } | Node::Def { .. } => false,
    _ => node.body().is_some_and(has_break),
  })
}

/// the `else` of a loop that is no longer native. runs only if `cond` holds after the loop, or
/// always if there is no `cond`.
fn after_loop(
  cx: &mut Cx<'_>,
  ret: &mut Body,
  cond: Option<String>,
  else_: Body,
) -> Result<(), Error> {
  let b = body(cx, else_)?;
  match cond {
    Some(cond) => ret.push(Node::If { cond, body: b }),
    None => ret.extend(b),
  }
  Ok(())
}

fn while_(
  cx: &mut Cx<'_>,
  ret: &mut Body,
  cond: Expr,
  b: Body,
  else_: Option<Body>,
) -> Result<(), Error> {
  if !cx.on(Pass::Break) || !has_break(&b) {
    let b = in_loop(cx, None, b)?;
    ret.push(Node::While { cond, body: b });
    if let Some(b) = else_ {
      ret.push(Node::Else { body: body(cx, b)? });
    }
    return Ok(());
  }
  let flag = cx.fresh_while();
  ret.push(Node::stmt(format!("{flag} = True")));
  let cond = format!("{flag} and ({cond})");
  let b = in_loop(cx, Some(flag.clone()), b)?;
  ret.push(Node::While { cond, body: b });
  // the flag is still set exactly when no `break` ran.
  if let Some(b) = else_ {
    after_loop(cx, ret, Some(flag), b)?;
  }
  Ok(())
}

fn for_(
  cx: &mut Cx<'_>,
  ret: &mut Body,
  (binder, source): (Expr, Expr),
  b: Body,
  else_: Option<Body>,
) -> Result<(), Error> {
  if !cx.on(Pass::For) {
    let b = in_loop(cx, None, b)?;
    ret.push(Node::For { binder, source, body: b });
    if let Some(b) = else_ {
      ret.push(Node::Else { body: body(cx, b)? });
    }
    return Ok(());
  }
  let (iter, flag) = cx.fresh_for();
  // exhaustion and `break` both clear the flag, so only exhaustion sets this.
  let done = (else_.is_some() && has_break(&b)).then(|| cx.fresh_done());
  ret.push(Node::stmt(format!("{iter} = iter({source})")));
  ret.push(Node::stmt(format!("{flag} = True")));
  let mut on_stop = vec![Node::stmt(format!("{flag} = False"))];
  if let Some(done) = &done {
    ret.push(Node::stmt(format!("{done} = False")));
    on_stop.push(Node::stmt(format!("{done} = True")));
  }
  on_stop.push(Node::keyword("continue", ""));
  let mut new = vec![
    Node::Block {
      token: "try".to_owned(),
      header: String::new(),
      body: vec![Node::stmt(format!("{binder} = next({iter})"))],
    },
    Node::Block { token: "except".to_owned(), header: "StopIteration".to_owned(), body: on_stop },
  ];
  new.extend(in_loop(cx, Some(flag.clone()), b)?);
  ret.push(Node::While { cond: flag, body: new });
  if let Some(b) = else_ {
    after_loop(cx, ret, done, b)?;
  }
  Ok(())
}

fn break_(cx: &Cx<'_>, ret: &mut Body) -> Result<(), Error> {
  if !cx.on(Pass::Break) {
    ret.push(Node::Break);
    return Ok(());
  }
  match cx.breaks.last() {
    None => return Err(Error { kind: Kind::BreakOutsideLoop }),
    Some(None) => ret.push(Node::Break),
    Some(Some(flag)) => {
      log::debug!("lower break to clear {flag}");
      ret.push(Node::stmt(format!("{flag} = False")));
      ret.push(Node::keyword("continue", ""));
    }
  }
  Ok(())
}

fn return_(cx: &Cx<'_>, ret: &mut Body, e: Expr) {
  let Some(holder) = &cx.ret else {
    ret.push(Node::Return(e));
    return;
  };
  let value = if e.is_empty() { "None" } else { e.as_str() };
  ret.push(Node::stmt(format!("{holder} = {value}")));
  ret.push(Node::keyword("yield", ""));
}

/// NOTE: the result holder is global, so a lowered function is not reentrant: a nested call that
/// has not finished when the outer one writes its result clobbers the holder.
fn def(
  cx: &mut Cx<'_>,
  ret: &mut Body,
  (name, params, returns): (String, String, Expr),
  b: Body,
) -> Result<(), Error> {
  let names = cx.on(Pass::Return).then(|| cx.fresh_function(&name));
  let breaks = std::mem::take(&mut cx.breaks);
  let outer = std::mem::replace(&mut cx.ret, names.as_ref().map(|(_, holder)| holder.clone()));
  let b = body(cx, b);
  cx.breaks = breaks;
  cx.ret = outer;
  let mut b = b?;
  let Some((inner, holder)) = names else {
    ret.push(Node::Def { name, params, returns, body: b });
    return Ok(());
  };
  let trailing = b.split_off(end_of_content(&b));
  let mut new =
    vec![Node::keyword("global", holder.as_str()), Node::stmt(format!("{holder} = None"))];
  new.extend(b);
  new.push(Node::keyword("yield", ""));
  let driver = format!(
    "{name} = (lambda body: lambda *args, **kwargs: (next(body(*args, **kwargs)), {holder})[1])({inner})"
  );
  ret.push(Node::Def { name: inner, params, returns, body: new });
  ret.push(Node::stmt(driver));
  ret.extend(trailing);
  Ok(())
}
