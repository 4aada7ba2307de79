//! Assertion views: actor-less commands that check a resolved value and
//! leave the world untouched.

use crate::arg::Arg;
use crate::command::Command;
use crate::core_values::{get_core_value, get_number_v};
use crate::params::Params;
use crate::world::ScenarioWorld;
use scen_value::{assertion_failed, Decimal, ScenResult, Value};
use std::cmp::Ordering;

fn assert_compares<W>(world: W, expected: &Value, given: &Value) -> ScenResult<W> {
    if expected.compare_to(given)? {
        Ok(world)
    } else {
        Err(assertion_failed(format!("expected {expected}, got {given}")))
    }
}

fn assert_ordered<W>(world: W, params: &Params, wanted: Ordering, label: &str) -> ScenResult<W> {
    let given = params.get("given")?;
    let expected = params.get("expected")?;
    if given.compare_order(expected)? == wanted {
        Ok(world)
    } else {
        Err(assertion_failed(format!(
            "expected {given} to be {label} {expected}"
        )))
    }
}

/// Relative-error check: `|expected - given| / |expected| <= tolerance`.
/// A zero expected value only matches a zero given value.
fn approx_within(given: &Decimal, expected: &Decimal, tolerance: &Decimal) -> ScenResult<bool> {
    let diff = expected.sub(given);
    if diff.is_zero() {
        return Ok(true);
    }
    if expected.is_zero() {
        return Ok(false);
    }
    let ratio = diff.div(expected)?;
    let ratio = if ratio < Decimal::zero() { ratio.neg() } else { ratio };
    Ok(ratio <= *tolerance)
}

/// The assertion command registry. All of these are views: they never act
/// on behalf of an account, and a passing assertion returns the world
/// unchanged. The boolean assertions go through the comparison matrix, so
/// a numeric status code of `0` asserts `True`.
pub fn assertion_commands<W: ScenarioWorld + 'static>() -> Vec<Command<W>> {
    vec![
        Command::view(
            "\"Approx given:<Value> expected:<Value> tolerance:<Value>\" - Fails unless given is within the relative tolerance of expected (0.001 when omitted)",
            "Approx",
            vec![
                Arg::new("given", get_number_v),
                Arg::new("expected", get_number_v),
                Arg::new("tolerance", get_number_v)
                    .with_default(Value::number(Decimal::pow10(-3))),
            ],
            |world: W, params| {
                let given = params.get_number("given")?;
                let expected = params.get_number("expected")?;
                let tolerance = params.get_number("tolerance")?;
                if approx_within(given, expected, tolerance)? {
                    Ok(world)
                } else {
                    Err(assertion_failed(format!(
                        "expected {given} to approximately equal {expected} within {tolerance}"
                    )))
                }
            },
        ),
        Command::view(
            "\"Equal given:<Value> expected:<Value>\" - Fails unless the two values compare equal",
            "Equal",
            vec![
                Arg::new("given", get_core_value),
                Arg::new("expected", get_core_value),
            ],
            |world: W, params| {
                assert_compares(world, params.get("expected")?, params.get("given")?)
            },
        ),
        Command::view(
            "\"given:<Value> LessThan expected:<Value>\" - Fails unless given orders below expected",
            "LessThan",
            vec![
                Arg::new("given", get_core_value),
                Arg::new("expected", get_core_value),
            ],
            |world: W, params| assert_ordered(world, params, Ordering::Less, "less than"),
        )
        .with_name_pos(1),
        Command::view(
            "\"given:<Value> GreaterThan expected:<Value>\" - Fails unless given orders above expected",
            "GreaterThan",
            vec![
                Arg::new("given", get_core_value),
                Arg::new("expected", get_core_value),
            ],
            |world: W, params| assert_ordered(world, params, Ordering::Greater, "greater than"),
        )
        .with_name_pos(1),
        Command::view(
            "\"True given:<Value>\" - Fails unless the value compares equal to true",
            "True",
            vec![Arg::new("given", get_core_value)],
            |world: W, params| assert_compares(world, &Value::Bool(true), params.get("given")?),
        ),
        Command::view(
            "\"False given:<Value>\" - Fails unless the value compares equal to false",
            "False",
            vec![Arg::new("given", get_core_value)],
            |world: W, params| assert_compares(world, &Value::Bool(false), params.get("given")?),
        ),
    ]
}
