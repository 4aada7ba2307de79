//! The dual-path value resolver: literal parse first, recursive dispatch
//! second.

use scen_expr::Expr;
use scen_value::{type_mismatch, ScenResult, Value, ValueKind};

/// Resolve an expression to a value of the expected variant.
///
/// A bare atom is first offered to `simple_parse`; if that fails the error
/// is remembered and the expression falls through to `recursive_resolve`
/// (which typically re-enters the dispatcher against the full registry).
/// Should the recursive path also fail, the remembered simple error wins —
/// a literal like `5x` should fail with the precise local parse error, not
/// an opaque "no descriptor matched".
///
/// Whichever path produces a value, it must belong to `expected` or the
/// resolution fails `TypeMismatch`.
pub fn resolve_value<W>(
    world: &W,
    expr: &Expr,
    simple_parse: impl Fn(&str) -> ScenResult<Value>,
    recursive_resolve: impl Fn(&W, &Expr) -> ScenResult<Value>,
    expected: ValueKind,
) -> ScenResult<Value> {
    let mut simple_err = None;
    if let Expr::Atom(text) = expr {
        match simple_parse(text) {
            Ok(value) => return check_kind(value, expr, expected),
            Err(err) => simple_err = Some(err),
        }
    }
    match recursive_resolve(world, expr) {
        Ok(value) => check_kind(value, expr, expected),
        Err(recursive_err) => Err(simple_err.unwrap_or(recursive_err)),
    }
}

fn check_kind(value: Value, expr: &Expr, expected: ValueKind) -> ScenResult<Value> {
    if value.kind() == expected {
        Ok(value)
    } else {
        Err(type_mismatch(
            expr.to_string(),
            expected.to_string(),
            value.to_string(),
        ))
    }
}
