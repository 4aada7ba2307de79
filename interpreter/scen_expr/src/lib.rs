#![deny(clippy::arithmetic_side_effects)]
//! Scen Expr - expression model for the scenario interpreter.
//!
//! An expression is the interpreter's input unit: either a bare atom or an
//! ordered list of sub-expressions. Expressions are produced by an external
//! lexer and consumed read-only by the binding and dispatch layers.
//!
//! Two normalization rules are applied before a descriptor extracts a name
//! and arguments from an expression:
//!
//! 1. A singleton list whose sole element is itself a list unwraps one
//!    level, repeatedly: `((X)) → (X)`. This supports scripts that
//!    over-bracket literal nested values.
//! 2. A bare atom promotes to a singleton list: `X → (X)`, so downstream
//!    logic always sees list shape.
//!
//! Both rules live in [`Expr::elements`].

use std::borrow::Cow;
use std::fmt;

/// A scenario-script expression node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// A bare token, e.g. `True` or `5.1`.
    Atom(String),
    /// An ordered sequence of sub-expressions.
    List(Vec<Expr>),
}

impl Expr {
    /// Build an atom expression.
    pub fn atom(text: impl Into<String>) -> Self {
        Expr::Atom(text.into())
    }

    /// Build a list expression.
    pub fn list(items: Vec<Expr>) -> Self {
        Expr::List(items)
    }

    /// The atom's text, if this is an atom.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Expr::Atom(text) => Some(text),
            Expr::List(_) => None,
        }
    }

    /// True for the empty atom and the empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Atom(text) => text.is_empty(),
            Expr::List(items) => items.is_empty(),
        }
    }

    /// Normalized element view of this expression.
    ///
    /// Applies the two normalization rules from the module docs: redundant
    /// outer brackets are peeled off and a bare atom becomes a singleton
    /// slice. The result borrows from `self` except in the atom case.
    pub fn elements(&self) -> Cow<'_, [Expr]> {
        match self {
            Expr::Atom(_) => Cow::Owned(vec![self.clone()]),
            Expr::List(items) => {
                let mut items = items.as_slice();
                loop {
                    match items {
                        [Expr::List(inner)] => items = inner.as_slice(),
                        _ => break,
                    }
                }
                Cow::Borrowed(items)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Atom(text) => {
                if text.is_empty() || text.chars().any(char::is_whitespace) {
                    write!(f, "\"{text}\"")
                } else {
                    write!(f, "{text}")
                }
            }
            Expr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
