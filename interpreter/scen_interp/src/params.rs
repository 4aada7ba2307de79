//! The bound-parameter record handed to handlers.

use rustc_hash::FxHashMap;
use scen_expr::Expr;
use scen_value::{type_mismatch, Decimal, ScenError, ScenResult, Value, ValueKind};

/// Parameters bound by the argument fold, keyed by `Arg` name.
///
/// The typed accessors fail `TypeMismatch` when a handler asks for a
/// variant the fold did not bind; asking for a name that was never bound
/// is a descriptor-definition bug and fails with a plain error.
#[derive(Clone, Debug, Default)]
pub struct Params {
    values: FxHashMap<&'static str, Value>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    pub(crate) fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> ScenResult<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| ScenError::new(format!("no bound parameter named `{name}`")))
    }

    pub fn get_bool(&self, name: &str) -> ScenResult<bool> {
        match self.get(name)? {
            Value::Bool(b) => Ok(*b),
            other => Err(self.mismatch(name, ValueKind::Bool, other)),
        }
    }

    pub fn get_string(&self, name: &str) -> ScenResult<&str> {
        match self.get(name)? {
            Value::Str(s) => Ok(s),
            other => Err(self.mismatch(name, ValueKind::Str, other)),
        }
    }

    pub fn get_number(&self, name: &str) -> ScenResult<&Decimal> {
        match self.get(name)? {
            Value::Num { val, .. } => Ok(val),
            other => Err(self.mismatch(name, ValueKind::Number, other)),
        }
    }

    pub fn get_address(&self, name: &str) -> ScenResult<&str> {
        match self.get(name)? {
            Value::Address(addr) => Ok(addr),
            other => Err(self.mismatch(name, ValueKind::Address, other)),
        }
    }

    pub fn get_list(&self, name: &str) -> ScenResult<&[Value]> {
        match self.get(name)? {
            Value::List(items) | Value::Array(items) => Ok(items),
            other => Err(self.mismatch(name, ValueKind::List, other)),
        }
    }

    pub fn get_event(&self, name: &str) -> ScenResult<&Expr> {
        match self.get(name)? {
            Value::Event(expr) => Ok(expr),
            other => Err(self.mismatch(name, ValueKind::Event, other)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn mismatch(&self, name: &str, expected: ValueKind, actual: &Value) -> ScenError {
        type_mismatch(
            format!("parameter `{name}`"),
            expected.to_string(),
            actual.to_string(),
        )
    }
}
