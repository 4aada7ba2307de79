//! Runtime values produced by resolving expressions.
//!
//! The variant set is closed: every resolver in the system produces one of
//! these, and the comparison matrix in [`compare`](self) is exhaustively
//! matched over them so the compiler checks its completeness.
//!
//! Values are immutable and created fresh on every resolution; nothing is
//! pooled or mutated in place.

mod compare;
#[cfg(test)]
mod tests;

use crate::decimal::Decimal;
use scen_expr::Expr;
use std::fmt;

/// Presentation subkind of a numeric value.
///
/// All three compare and order identically; the subkind records how the
/// number was produced (`Exp` and `Percent` carry an 10^18 mantissa scale
/// applied at resolution time).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberKind {
    Plain,
    Exp,
    Percent,
}

/// A resolved runtime value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Str(String),
    /// Arbitrary-precision decimal number.
    Num { val: Decimal, kind: NumberKind },
    /// A number that compares only to a given count of significant figures.
    Precise { val: Decimal, sig_figs: u32 },
    /// Canonical account identifier.
    Address(String),
    /// Ordered key/value table.
    Map(Vec<(String, Value)>),
    List(Vec<Value>),
    Array(Vec<Value>),
    /// Raw expression echo, for descriptors that defer resolution.
    Event(Expr),
    /// Matches every value in comparisons.
    Anything,
    /// Matches no value, not even itself.
    Nothing,
}

/// Variant discriminant, used for expected-variant checks after resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Str,
    Number,
    Precise,
    Address,
    Map,
    List,
    Array,
    Event,
    Anything,
    Nothing,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "Bool",
            ValueKind::Str => "String",
            ValueKind::Number => "Number",
            ValueKind::Precise => "Precise",
            ValueKind::Address => "Address",
            ValueKind::Map => "Map",
            ValueKind::List => "List",
            ValueKind::Array => "Array",
            ValueKind::Event => "Event",
            ValueKind::Anything => "Anything",
            ValueKind::Nothing => "Nothing",
        };
        write!(f, "{name}")
    }
}

impl Value {
    /// A plain number.
    pub fn number(val: Decimal) -> Self {
        Value::Num {
            val,
            kind: NumberKind::Plain,
        }
    }

    /// A mantissa-scaled exponential number.
    pub fn exp_number(val: Decimal) -> Self {
        Value::Num {
            val,
            kind: NumberKind::Exp,
        }
    }

    /// A mantissa-scaled percentage.
    pub fn percent(val: Decimal) -> Self {
        Value::Num {
            val,
            kind: NumberKind::Percent,
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    pub fn address(addr: impl Into<String>) -> Self {
        Value::Address(addr.into())
    }

    pub fn precise(val: Decimal, sig_figs: u32) -> Self {
        Value::Precise { val, sig_figs }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Str(_) => ValueKind::Str,
            Value::Num { .. } => ValueKind::Number,
            Value::Precise { .. } => ValueKind::Precise,
            Value::Address(_) => ValueKind::Address,
            Value::Map(_) => ValueKind::Map,
            Value::List(_) => ValueKind::List,
            Value::Array(_) => ValueKind::Array,
            Value::Event(_) => ValueKind::Event,
            Value::Anything => ValueKind::Anything,
            Value::Nothing => ValueKind::Nothing,
        }
    }

    /// The decimal payload of a numeric value.
    pub fn as_number(&self) -> Option<&Decimal> {
        match self {
            Value::Num { val, .. } => Some(val),
            _ => None,
        }
    }

    /// Truthiness, per variant:
    ///
    /// | Variant | Truthy when |
    /// |---|---|
    /// | Bool | true |
    /// | String | non-empty |
    /// | Number, Precise | ≠ 0 |
    /// | Address | ≠ the all-zero identifier |
    /// | Map, List, Array | non-empty |
    /// | Event | non-empty expression |
    /// | Anything | always |
    /// | Nothing | never |
    pub fn truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Num { val, .. } => !val.is_zero(),
            Value::Precise { val, .. } => !val.is_zero(),
            Value::Address(addr) => !is_zero_address(addr),
            Value::Map(entries) => !entries.is_empty(),
            Value::List(items) | Value::Array(items) => !items.is_empty(),
            Value::Event(expr) => !expr.is_empty(),
            Value::Anything => true,
            Value::Nothing => false,
        }
    }
}

fn is_zero_address(addr: &str) -> bool {
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    !hex.is_empty() && hex.bytes().all(|b| b == b'0')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Num { val, .. } => write!(f, "{val}"),
            Value::Precise { val, sig_figs } => write!(f, "{val}~{sig_figs}"),
            Value::Address(addr) => write!(f, "{addr}"),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::List(items) | Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Event(expr) => write!(f, "{expr}"),
            Value::Anything => write!(f, "Anything"),
            Value::Nothing => write!(f, "Nothing"),
        }
    }
}
