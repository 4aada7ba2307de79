//! Scen Interp - descriptor binding and dispatch for the scenario
//! interpreter.
//!
//! A scenario script is a sequence of nested bracketed expressions
//! describing actions and queries against a simulated external system.
//! This crate turns a raw [`Expr`] into a handler invocation:
//!
//! - [`Arg`]: one parameter-binding rule, with its default / implicit /
//!   variadic / mapped / nullable / rescue modifiers
//! - [`bind_args`]: the binding fold that consumes an expression's tail
//!   into a typed [`Params`] record
//! - [`Command`] (mutates the world) and [`Fetcher`] (pure query): named,
//!   schema-carrying dispatch targets
//! - [`resolve_value`]: the literal-parse-first-else-recursive-dispatch
//!   strategy with its error-precedence rule
//! - [`dispatch_command`] / [`dispatch_fetcher`]: registration-order
//!   linear scan, first match wins
//!
//! The world threaded through every call is opaque to the core: state
//! changes are expressed as "the command returns a new world", never as
//! in-place mutation. The one hook the core needs is
//! [`ScenarioWorld::fetcher_registry`], which gives recursive value
//! resolution its ambient registry; the registry is built once at world
//! construction and held as a field.

mod arg;
pub mod assertions;
mod bind;
mod command;
pub mod core_values;
mod dispatch;
mod fetcher;
mod params;
mod resolve;
mod world;

pub use arg::Arg;
pub use bind::bind_args;
pub use command::Command;
pub use dispatch::{dispatch_command, dispatch_fetcher};
pub use fetcher::Fetcher;
pub use params::Params;
pub use resolve::resolve_value;
pub use world::{FetcherRegistry, ScenarioWorld};

pub use core_values::{core_fetchers, get_core_value};

// Re-export the expression and value layers for convenience
pub use scen_expr::Expr;
pub use scen_value::{
    Decimal, NumberKind, ScenError, ScenErrorKind, ScenResult, Value, ValueKind,
};
