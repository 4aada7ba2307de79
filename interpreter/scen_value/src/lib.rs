//! Scen Value - runtime value algebra for the scenario interpreter.
//!
//! This crate provides:
//! - The closed [`Value`] enum produced by resolving expressions, with its
//!   truthiness, equality-coercion and ordering contracts
//! - [`Decimal`], the arbitrary-precision decimal every numeric variant is
//!   built on (no floating point anywhere)
//! - The shared error taxonomy ([`ScenError`], [`ScenResult`]) used across
//!   binding, dispatch and comparison
//!
//! # Comparison contract
//!
//! `Value::compare_to` is a partial equality relation: it is defined only
//! for the documented coercion pairs and fails with `Incomparable` for any
//! other pair, never silently returning `false`. `Value::compare_order` is
//! strictly numeric (Number/Precise pairs only). No code outside this crate
//! may compare or order values by other means.

mod decimal;
pub mod errors;
mod value;

pub use decimal::{Decimal, MAX_DIV_EXTRA_DIGITS};
pub use errors::{ScenError, ScenErrorKind, ScenResult};
pub use errors::{
    assertion_failed, division_by_zero, extra_arguments, incomparable, invalid_address,
    missing_actor, missing_argument, not_a_number, type_mismatch, unknown_descriptor,
};
pub use value::{NumberKind, Value, ValueKind};
