//! Registry scan and first-match dispatch.
//!
//! Registries are ordered lists and registration order is semantically
//! significant: the scan is linear and the first matching descriptor wins,
//! so a catchall registered before a more specific descriptor shadows it.
//! There is no specificity heuristic.

use crate::command::Command;
use crate::fetcher::Fetcher;
use scen_expr::Expr;
use scen_value::{unknown_descriptor, ScenResult, Value};
use tracing::trace;

/// Dispatch an expression to the first matching command.
///
/// `kind` labels the registry in errors (e.g. `"Core"`).
pub fn dispatch_command<W: Sync>(
    kind: &str,
    commands: &[Command<W>],
    world: W,
    expr: &Expr,
    actor: Option<&str>,
) -> ScenResult<W> {
    for command in commands {
        if command.matches(expr) {
            trace!(kind, name = command.name(), %expr, "dispatching command");
            return command.process(world, actor, expr);
        }
    }
    Err(unknown_descriptor(kind, expr.to_string()))
}

/// Dispatch an expression to the first matching fetcher.
pub fn dispatch_fetcher<W: Sync>(
    kind: &str,
    fetchers: &[Fetcher<W>],
    world: &W,
    expr: &Expr,
) -> ScenResult<Value> {
    for fetcher in fetchers {
        if fetcher.matches(expr) {
            trace!(kind, name = fetcher.name(), %expr, "dispatching fetcher");
            return fetcher.fetch(world, expr);
        }
    }
    Err(unknown_descriptor(kind, expr.to_string()))
}
