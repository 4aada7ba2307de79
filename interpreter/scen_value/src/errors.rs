//! Error types for scenario evaluation.
//!
//! One structured error type flows through binding, dispatch, resolution
//! and comparison. Factory functions (e.g. [`missing_argument`]) are the
//! preferred construction path; they populate both `kind` and `message`.
//!
//! Errors propagate synchronously up the fold/dispatch call chain. The only
//! local-recovery points in the whole interpreter are an `Arg`'s `rescue`
//! substitution and the simple-before-recursive retry in `resolve_value`;
//! everything else surfaces to the top-level `process`/`fetch` caller.

use std::fmt;

/// Result of any interpreter-core operation.
pub type ScenResult<T> = Result<T, ScenError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScenErrorKind {
    /// A positional argument had no token left, no default configured.
    MissingArgument { descriptor: String, arg: String },
    /// Tokens remained after the binding fold consumed every argument.
    ExtraArguments { descriptor: String, leftover: String },
    /// No descriptor in the registry matched the expression.
    UnknownDescriptor { kind: String, expression: String },
    /// A resolved value did not belong to the expected variant.
    TypeMismatch {
        expression: String,
        expected: String,
        actual: String,
    },
    /// The two variants have no defined comparison.
    Incomparable { left: String, right: String },
    /// A literal failed to parse as a decimal number.
    NotANumber { text: String },
    /// A literal failed to parse as an account address.
    InvalidAddress { text: String },
    DivisionByZero,
    /// An actor-requiring command was invoked without one.
    MissingActor { command: String },
    /// An assertion view observed an unexpected value.
    AssertionFailed { message: String },
    /// Catch-all for externally supplied resolver/handler failures.
    Custom { message: String },
}

impl fmt::Display for ScenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { descriptor, arg } => {
                write!(f, "missing argument `{arg}` for `{descriptor}`")
            }
            Self::ExtraArguments { descriptor, leftover } => {
                write!(f, "extra arguments for `{descriptor}`: {leftover}")
            }
            Self::UnknownDescriptor { kind, expression } => {
                write!(f, "no {kind} descriptor matches {expression}")
            }
            Self::TypeMismatch {
                expression,
                expected,
                actual,
            } => {
                write!(f, "expected {expected} from {expression}, was {actual}")
            }
            Self::Incomparable { left, right } => {
                write!(f, "cannot compare {left} with {right}")
            }
            Self::NotANumber { text } => write!(f, "`{text}` is not a number"),
            Self::InvalidAddress { text } => write!(f, "`{text}` is not an address"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::MissingActor { command } => {
                write!(f, "command `{command}` requires an actor")
            }
            Self::AssertionFailed { message } => write!(f, "assertion failed: {message}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// A scenario evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenError {
    /// Structured category, for programmatic matching.
    pub kind: ScenErrorKind,
    /// Human-readable message; for factory-created errors this equals
    /// `kind.to_string()`.
    pub message: String,
}

impl ScenError {
    /// Create an error with just a message, using the `Custom` kind.
    /// Prefer a specific factory function when one fits.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        ScenError {
            kind: ScenErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: ScenErrorKind) -> Self {
        let message = kind.to_string();
        ScenError { kind, message }
    }
}

impl fmt::Display for ScenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ScenError {}

pub fn missing_argument(descriptor: &str, arg: &str) -> ScenError {
    ScenError::from_kind(ScenErrorKind::MissingArgument {
        descriptor: descriptor.to_string(),
        arg: arg.to_string(),
    })
}

pub fn extra_arguments(descriptor: &str, leftover: impl Into<String>) -> ScenError {
    ScenError::from_kind(ScenErrorKind::ExtraArguments {
        descriptor: descriptor.to_string(),
        leftover: leftover.into(),
    })
}

pub fn unknown_descriptor(kind: &str, expression: impl Into<String>) -> ScenError {
    ScenError::from_kind(ScenErrorKind::UnknownDescriptor {
        kind: kind.to_string(),
        expression: expression.into(),
    })
}

pub fn type_mismatch(
    expression: impl Into<String>,
    expected: impl Into<String>,
    actual: impl Into<String>,
) -> ScenError {
    ScenError::from_kind(ScenErrorKind::TypeMismatch {
        expression: expression.into(),
        expected: expected.into(),
        actual: actual.into(),
    })
}

pub fn incomparable(left: impl Into<String>, right: impl Into<String>) -> ScenError {
    ScenError::from_kind(ScenErrorKind::Incomparable {
        left: left.into(),
        right: right.into(),
    })
}

pub fn not_a_number(text: &str) -> ScenError {
    ScenError::from_kind(ScenErrorKind::NotANumber {
        text: text.to_string(),
    })
}

pub fn invalid_address(text: &str) -> ScenError {
    ScenError::from_kind(ScenErrorKind::InvalidAddress {
        text: text.to_string(),
    })
}

pub fn division_by_zero() -> ScenError {
    ScenError::from_kind(ScenErrorKind::DivisionByZero)
}

pub fn missing_actor(command: &str) -> ScenError {
    ScenError::from_kind(ScenErrorKind::MissingActor {
        command: command.to_string(),
    })
}

pub fn assertion_failed(message: impl Into<String>) -> ScenError {
    ScenError::from_kind(ScenErrorKind::AssertionFailed {
        message: message.into(),
    })
}
