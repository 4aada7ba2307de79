//! The argument-binding fold: raw expression tail in, typed parameter
//! record out.

use crate::arg::Arg;
use crate::params::Params;
use rayon::prelude::*;
use scen_expr::Expr;
use scen_value::{extra_arguments, missing_argument, type_mismatch, ScenResult, Value};
use std::collections::VecDeque;
use tracing::trace;

/// Does the token at `name_pos` of the normalized expression match `name`?
/// Comparison is whitespace-trimmed and case-insensitive.
pub(crate) fn matches_name(expr: &Expr, name: &str, name_pos: usize) -> bool {
    let elements = expr.elements();
    match elements.get(name_pos).and_then(Expr::as_atom) {
        Some(token) => token.trim().eq_ignore_ascii_case(name.trim()),
        None => false,
    }
}

/// Bind an expression's tail against a descriptor's argument list.
///
/// The expression is normalized, then the name token is split out: a
/// `catchall` descriptor keeps the whole normalized expression as its tail,
/// otherwise the token at `name_pos` is spliced out and the remainder, in
/// original relative order, becomes the tail. The fold then walks the
/// argument list carrying an explicit `(bound, remaining)` accumulator:
///
/// - **nullable** with an empty tail binds `Nothing`, consuming nothing
/// - **variadic** consumes the entire tail: **mapped** resolves each
///   element independently (output order is positional regardless of
///   completion order), otherwise the resolver is called once with the
///   whole tail
/// - **implicit** resolves from the world alone, leaving the tail intact
/// - **positional** pops the first token, falling back to the default (or
///   failing `MissingArgument`); **mapped** requires a list token and
///   resolves its elements independently; a configured **rescue** value
///   replaces any resolution failure, swallowing the error
///
/// Tokens left over after the fold fail `ExtraArguments`.
pub fn bind_args<W: Sync>(
    world: &W,
    descriptor: &str,
    args: &[Arg<W>],
    expr: &Expr,
    name_pos: usize,
    catchall: bool,
) -> ScenResult<Params> {
    let elements = expr.elements().into_owned();
    let mut remaining: VecDeque<Expr> = if catchall {
        elements.into()
    } else {
        let mut elements = elements;
        if name_pos >= elements.len() {
            return Err(type_mismatch(
                expr.to_string(),
                format!("a name token at position {name_pos}"),
                "end of expression",
            ));
        }
        elements.remove(name_pos);
        elements.into()
    };

    let mut bound = Params::new();
    for arg in args {
        if arg.is_nullable() && remaining.is_empty() {
            bound.insert(arg.name(), Value::Nothing);
            continue;
        }

        if arg.is_variadic() {
            let tail: Vec<Expr> = remaining.drain(..).collect();
            let value = if arg.is_mapped() {
                Value::List(resolve_each(world, arg, &tail)?)
            } else {
                arg.resolve(world, &Expr::List(tail))?
            };
            bound.insert(arg.name(), value);
            continue;
        }

        if arg.is_implicit() {
            bound.insert(arg.name(), arg.resolve_implicit(world)?);
            continue;
        }

        // Positional.
        let Some(head) = remaining.pop_front() else {
            match arg.default_value() {
                Some(default) => {
                    trace!(descriptor, arg = arg.name(), "binding default");
                    bound.insert(arg.name(), default.clone());
                    continue;
                }
                None => return Err(missing_argument(descriptor, arg.name())),
            }
        };
        let resolved = if arg.is_mapped() {
            match &head {
                Expr::List(items) => resolve_each(world, arg, items).map(Value::List),
                Expr::Atom(_) => Err(type_mismatch(
                    head.to_string(),
                    "a list",
                    "an atom",
                )),
            }
        } else {
            arg.resolve(world, &head)
        };
        match resolved {
            Ok(value) => bound.insert(arg.name(), value),
            Err(err) => match arg.rescue_value() {
                Some(fallback) => {
                    trace!(descriptor, arg = arg.name(), %err, "rescued");
                    bound.insert(arg.name(), fallback.clone());
                }
                None => return Err(err),
            },
        }
    }

    if !remaining.is_empty() {
        let leftover: Vec<String> = remaining.iter().map(ToString::to_string).collect();
        return Err(extra_arguments(descriptor, leftover.join(" ")));
    }
    Ok(bound)
}

/// Resolve tail elements independently. Results are gathered positionally:
/// output `i` corresponds to input `i` regardless of completion order, and
/// the surfaced error is the positionally first failure.
fn resolve_each<W: Sync>(world: &W, arg: &Arg<W>, items: &[Expr]) -> ScenResult<Vec<Value>> {
    let results: Vec<ScenResult<Value>> = items
        .par_iter()
        .map(|item| arg.resolve(world, item))
        .collect();
    results.into_iter().collect()
}
