//! The value comparison matrix.
//!
//! `compare_to` is a partial equality relation: defined only for the
//! coercion pairs below, failing `Incomparable` for every other pair.
//! `compare_order` is strictly numeric.

use super::Value;
use crate::decimal::Decimal;
use crate::errors::{incomparable, ScenResult};
use std::cmp::Ordering;

impl Value {
    /// Equality under the coercion matrix:
    ///
    /// - Number↔Number: exact decimal comparison
    /// - Number↔Precise: the Number side is rounded to the Precise side's
    ///   significant figures first
    /// - Number↔String: the string is parsed as a number
    /// - Bool↔Number: through the protocol status-code mapping (see
    ///   [`bool_from_number`])
    /// - Bool↔String: only `"true"`/`"false"` literals
    /// - Address↔Address / Address↔String: canonical (case-insensitive)
    ///   comparison
    /// - List↔Array in any combination: elementwise, index-padding the
    ///   shorter side with `Nothing`
    /// - `Anything` matches everything; `Nothing` matches nothing, not
    ///   even itself
    pub fn compare_to(&self, other: &Value) -> ScenResult<bool> {
        match (self, other) {
            (Value::Anything, _) | (_, Value::Anything) => Ok(true),
            (Value::Nothing, _) | (_, Value::Nothing) => Ok(false),

            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Bool(a), Value::Num { val, .. }) | (Value::Num { val, .. }, Value::Bool(a)) => {
                match bool_from_number(val) {
                    Some(b) => Ok(*a == b),
                    None => Err(self.incomparable_with(other)),
                }
            }
            (Value::Bool(a), Value::Str(s)) | (Value::Str(s), Value::Bool(a)) => {
                match bool_literal(s) {
                    Some(b) => Ok(*a == b),
                    None => Err(self.incomparable_with(other)),
                }
            }

            (Value::Num { val: a, .. }, Value::Num { val: b, .. }) => Ok(a == b),
            (Value::Num { val: n, .. }, Value::Precise { val, sig_figs })
            | (Value::Precise { val, sig_figs }, Value::Num { val: n, .. }) => {
                Ok(n.round_sig_figs(*sig_figs) == val.round_sig_figs(*sig_figs))
            }
            (
                Value::Precise { val: a, sig_figs: fa },
                Value::Precise { val: b, sig_figs: fb },
            ) => {
                let figs = (*fa).min(*fb);
                Ok(a.round_sig_figs(figs) == b.round_sig_figs(figs))
            }
            (Value::Num { val, .. }, Value::Str(s)) | (Value::Str(s), Value::Num { val, .. }) => {
                match Decimal::parse(s) {
                    Ok(parsed) => Ok(parsed == *val),
                    Err(_) => Err(self.incomparable_with(other)),
                }
            }

            (Value::Str(a), Value::Str(b)) => Ok(a == b),
            (Value::Address(a), Value::Address(b))
            | (Value::Address(a), Value::Str(b))
            | (Value::Str(a), Value::Address(b)) => Ok(address_eq(a, b)),

            (
                Value::List(a) | Value::Array(a),
                Value::List(b) | Value::Array(b),
            ) => compare_elements(a, b),

            _ => Err(self.incomparable_with(other)),
        }
    }

    /// Three-way ordering; defined only for Number/Precise pairs.
    pub fn compare_order(&self, other: &Value) -> ScenResult<Ordering> {
        match (self, other) {
            (Value::Num { val: a, .. }, Value::Num { val: b, .. }) => Ok(a.cmp(b)),
            (Value::Num { val: n, .. }, Value::Precise { val, sig_figs }) => {
                Ok(n.round_sig_figs(*sig_figs).cmp(&val.round_sig_figs(*sig_figs)))
            }
            (Value::Precise { val, sig_figs }, Value::Num { val: n, .. }) => {
                Ok(val.round_sig_figs(*sig_figs).cmp(&n.round_sig_figs(*sig_figs)))
            }
            (
                Value::Precise { val: a, sig_figs: fa },
                Value::Precise { val: b, sig_figs: fb },
            ) => {
                let figs = (*fa).min(*fb);
                Ok(a.round_sig_figs(figs).cmp(&b.round_sig_figs(figs)))
            }
            _ => Err(self.incomparable_with(other)),
        }
    }

    fn incomparable_with(&self, other: &Value) -> crate::errors::ScenError {
        incomparable(self.kind().to_string(), other.kind().to_string())
    }
}

/// Protocol status-code convention: `0` reads as `true` (no error) and `1`
/// as `false`. This is deliberately the inverse of numeric truthiness and
/// must not leak into any other boolean context.
fn bool_from_number(val: &Decimal) -> Option<bool> {
    if val.is_zero() {
        return Some(true);
    }
    if *val == Decimal::pow10(0) {
        return Some(false);
    }
    None
}

fn bool_literal(text: &str) -> Option<bool> {
    let lower = text.trim().to_ascii_lowercase();
    match lower.as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn address_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn compare_elements(a: &[Value], b: &[Value]) -> ScenResult<bool> {
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).unwrap_or(&Value::Nothing);
        let right = b.get(i).unwrap_or(&Value::Nothing);
        if !left.compare_to(right)? {
            return Ok(false);
        }
    }
    Ok(true)
}
