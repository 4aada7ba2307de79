//! Core value resolvers and the registry-independent core fetchers.
//!
//! These are the leaf resolvers every descriptor schema is built from
//! (`get_number_v`, `get_address_v`, ...) plus the small fetcher registry
//! of universal constants and combinators (`True`, `Exactly`, `List`,
//! `Equal`, ...). Protocol- and contract-specific fetchers are registered
//! by the embedding world, appended after these in its
//! [`FetcherRegistry`](crate::FetcherRegistry).

use crate::arg::Arg;
use crate::dispatch::dispatch_fetcher;
use crate::fetcher::Fetcher;
use crate::resolve::resolve_value;
use crate::world::ScenarioWorld;
use rayon::prelude::*;
use scen_expr::Expr;
use scen_value::{
    invalid_address, not_a_number, type_mismatch, Decimal, ScenResult, Value, ValueKind,
};

const UINT96_MAX: &str = "79228162514264337593543950335";
const UINT256_MAX: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

/// Scale applied to exponential numbers and percentages: 10^18.
fn exp_mantissa() -> Decimal {
    Decimal::pow10(18)
}

/// Echo the raw expression, deferring resolution to the handler.
pub fn get_event_v<W>(_world: &W, expr: &Expr) -> ScenResult<Value> {
    Ok(Value::Event(expr.clone()))
}

/// Resolve a boolean. Accepts the literals `true`/`t`/`1` and
/// `false`/`f`/`0`; anything else falls through to fetcher dispatch.
pub fn get_bool_v<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    resolve_value(
        world,
        expr,
        |text| match text.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(Value::Bool(true)),
            "false" | "f" | "0" => Ok(Value::Bool(false)),
            _ => Err(type_mismatch(text, "a boolean literal", "an atom")),
        },
        get_core_value,
        ValueKind::Bool,
    )
}

/// Resolve a string; a bare atom is the string itself.
pub fn get_string_v<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    resolve_value(
        world,
        expr,
        |text| Ok(Value::string(text)),
        get_core_value,
        ValueKind::Str,
    )
}

/// Resolve a number; a bare atom is parsed as a decimal literal.
pub fn get_number_v<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    resolve_value(
        world,
        expr,
        |text| Decimal::parse(text).map(Value::number),
        get_core_value,
        ValueKind::Number,
    )
}

/// Resolve a number and scale it by the 10^18 mantissa.
pub fn get_exp_number_v<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    let base = get_number_v(world, expr)?;
    match base.as_number() {
        Some(val) => Ok(Value::exp_number(val.mul(&exp_mantissa()))),
        None => Err(not_a_number(&expr.to_string())),
    }
}

/// Resolve a mantissa-scaled percentage.
pub fn get_percent_v<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    let scaled = get_exp_number_v(world, expr)?;
    match scaled.as_number() {
        Some(val) => Ok(Value::percent(val.clone())),
        None => Err(not_a_number(&expr.to_string())),
    }
}

/// Resolve an address. A bare atom must be a `0x`-prefixed 40-digit hex
/// literal; the recursive path additionally accepts a string value and
/// coerces it.
pub fn get_address_v<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    resolve_value(
        world,
        expr,
        parse_address_literal,
        |world, expr| {
            let value = get_core_value(world, expr)?;
            Ok(match value {
                Value::Str(text) => Value::Address(text),
                other => other,
            })
        },
        ValueKind::Address,
    )
}

fn parse_address_literal(text: &str) -> ScenResult<Value> {
    let trimmed = text.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| invalid_address(text))?;
    if hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(Value::address(trimmed))
    } else {
        Err(invalid_address(text))
    }
}

/// Resolve a map from a list of `(key value)` pairs. Keys must be atoms;
/// atom values stay strings, anything else resolves recursively.
pub fn get_map_v<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    let mut entries = Vec::new();
    for element in expr.elements().iter() {
        let pair = match element {
            Expr::List(kv) if kv.len() == 2 => kv,
            other => {
                return Err(type_mismatch(
                    other.to_string(),
                    "a (key value) pair",
                    expr.to_string(),
                ))
            }
        };
        let Some(key) = pair[0].as_atom() else {
            return Err(type_mismatch(
                pair[0].to_string(),
                "an atom key",
                expr.to_string(),
            ));
        };
        let value = match &pair[1] {
            Expr::Atom(text) => Value::string(text.clone()),
            nested => get_core_value(world, nested)?,
        };
        entries.push((key.to_string(), value));
    }
    Ok(Value::Map(entries))
}

/// Resolve a typed array: every element goes through `element`, with
/// `List` atoms filtered out so `(List a b)` and `(a b)` read the same.
/// Results are gathered positionally regardless of completion order.
pub fn get_array_v<W: Sync>(
    world: &W,
    expr: &Expr,
    element: impl Fn(&W, &Expr) -> ScenResult<Value> + Sync,
) -> ScenResult<Value> {
    let elements = expr.elements();
    let items: Vec<&Expr> = elements
        .iter()
        .filter(|e| e.as_atom() != Some("List"))
        .collect();
    let results: Vec<ScenResult<Value>> = items
        .par_iter()
        .map(|&item| element(world, item))
        .collect();
    Ok(Value::Array(results.into_iter().collect::<ScenResult<Vec<_>>>()?))
}

/// Resolve any core value by dispatching against the world's registry.
pub fn get_core_value<W: ScenarioWorld>(world: &W, expr: &Expr) -> ScenResult<Value> {
    dispatch_fetcher("Core", world.fetcher_registry().fetchers(), world, expr)
}

/// Significant figures of a numeric literal: digits of the mantissa,
/// decimal point excluded, so `5.1000` carries five.
fn sig_figs(text: &str) -> u32 {
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);
    mantissa.chars().filter(char::is_ascii_digit).count() as u32
}

/// A fetcher converting a count of time units to seconds.
fn time_fetcher<W: ScenarioWorld + 'static>(
    doc: &'static str,
    name: &'static str,
    unit: &'static str,
    seconds_per_unit: &'static str,
) -> Fetcher<W> {
    Fetcher::new(doc, name, vec![Arg::new(unit, get_number_v)], move |_, params| {
        Ok(Value::number(
            params.get_number(unit)?.mul(&Decimal::parse(seconds_per_unit)?),
        ))
    })
}

/// The universal core fetchers, in registration order. Embedding worlds
/// append their own after these.
pub fn core_fetchers<W: ScenarioWorld + 'static>() -> Vec<Fetcher<W>> {
    vec![
        Fetcher::new("\"True\" - Returns true", "True", vec![], |_, _| {
            Ok(Value::Bool(true))
        }),
        Fetcher::new("\"False\" - Returns false", "False", vec![], |_, _| {
            Ok(Value::Bool(false))
        }),
        Fetcher::new("\"Zero\" - Returns 0", "Zero", vec![], |_, _| {
            Ok(Value::number(Decimal::zero()))
        }),
        Fetcher::new(
            "\"UInt96Max\" - Returns 2^96 - 1",
            "UInt96Max",
            vec![],
            |_, _| Ok(Value::number(Decimal::parse(UINT96_MAX)?)),
        ),
        Fetcher::new(
            "\"UInt256Max\" - Returns 2^256 - 1",
            "UInt256Max",
            vec![],
            |_, _| Ok(Value::number(Decimal::parse(UINT256_MAX)?)),
        ),
        Fetcher::new("\"Some\" - Returns 100e18", "Some", vec![], |_, _| {
            Ok(Value::number(Decimal::parse("100e18")?))
        }),
        Fetcher::new("\"Little\" - Returns 100e10", "Little", vec![], |_, _| {
            Ok(Value::number(Decimal::parse("100e10")?))
        }),
        Fetcher::new(
            "\"Exactly <Amount>\" - Returns a strict numerical value",
            "Exactly",
            vec![Arg::new("amt", get_event_v)],
            |world: &W, params| get_number_v(world, params.get_event("amt")?),
        ),
        Fetcher::new(
            "\"Hex <HexVal>\" - Returns a byte string with the given hex value",
            "Hex",
            vec![Arg::new("hexVal", get_event_v)],
            |world: &W, params| get_string_v(world, params.get_event("hexVal")?),
        ),
        Fetcher::new(
            "\"String <Str>\" - Returns a string literal",
            "String",
            vec![Arg::new("str", get_event_v)],
            |world: &W, params| get_string_v(world, params.get_event("str")?),
        ),
        Fetcher::new(
            "\"Exp <Amount>\" - Returns the mantissa for a given exp",
            "Exp",
            vec![Arg::new("amt", get_event_v)],
            |world: &W, params| get_exp_number_v(world, params.get_event("amt")?),
        ),
        Fetcher::new(
            "\"Neg <Amount>\" - Returns the amount subtracted from zero",
            "Neg",
            vec![Arg::new("amt", get_event_v)],
            |world: &W, params| {
                let amount = get_number_v(world, params.get_event("amt")?)?;
                match amount.as_number() {
                    Some(val) => Ok(Value::number(val.neg())),
                    None => Err(not_a_number(&amount.to_string())),
                }
            },
        ),
        Fetcher::new(
            "\"Precisely <Amount>\" - Matches a number to the literal's significant figures",
            "Precisely",
            vec![Arg::new("amt", get_string_v)],
            |_, params| {
                let text = params.get_string("amt")?;
                Ok(Value::precise(Decimal::parse(text)?, sig_figs(text)))
            },
        ),
        Fetcher::new(
            "\"Anything\" - Matches any value for assertions",
            "Anything",
            vec![],
            |_, _| Ok(Value::Anything),
        ),
        Fetcher::new(
            "\"Nothing\" - Matches no values and is nothing",
            "Nothing",
            vec![],
            |_, _| Ok(Value::Nothing),
        ),
        Fetcher::new(
            "\"Address addr:<Address>\" - Returns an address",
            "Address",
            vec![Arg::new("addr", get_address_v)],
            |_, params| params.get("addr").map(Clone::clone),
        ),
        Fetcher::new(
            "\"List ...\" - Returns a list of the given elements",
            "List",
            vec![Arg::new("els", get_core_value).variadic().mapped()],
            |_, params| params.get("els").map(Clone::clone),
        ),
        Fetcher::new(
            "\"Default val:<Value> def:<Value>\" - Returns value if truthy, otherwise default; short-circuits",
            "Default",
            vec![
                Arg::new("val", get_core_value),
                Arg::new("def", get_event_v),
            ],
            |world: &W, params| {
                let value = params.get("val")?;
                if value.truthy() {
                    Ok(value.clone())
                } else {
                    get_core_value(world, params.get_event("def")?)
                }
            },
        ),
        time_fetcher(
            "\"Minutes minutes:<Number>\" - Returns the number of minutes in seconds",
            "Minutes",
            "minutes",
            "60",
        ),
        time_fetcher(
            "\"Hours hours:<Number>\" - Returns the number of hours in seconds",
            "Hours",
            "hours",
            "3600",
        ),
        time_fetcher(
            "\"Days days:<Number>\" - Returns the number of days in seconds",
            "Days",
            "days",
            "86400",
        ),
        time_fetcher(
            "\"Weeks weeks:<Number>\" - Returns the number of weeks in seconds",
            "Weeks",
            "weeks",
            "604800",
        ),
        time_fetcher(
            "\"Years years:<Number>\" - Returns the number of years in seconds",
            "Years",
            "years",
            "31536000",
        ),
        Fetcher::new(
            "\"Equal given:<Value> expected:<Value>\" - Returns true if the given values are equal",
            "Equal",
            vec![
                Arg::new("given", get_core_value),
                Arg::new("expected", get_core_value),
            ],
            |_, params| {
                let given = params.get("given")?;
                let expected = params.get("expected")?;
                Ok(Value::Bool(expected.compare_to(given)?))
            },
        ),
    ]
}
