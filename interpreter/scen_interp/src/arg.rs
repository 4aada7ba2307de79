//! One parameter-binding rule within a descriptor.

use scen_expr::Expr;
use scen_value::{ScenError, ScenResult, Value};
use std::sync::Arc;

type ExprResolver<W> = Arc<dyn Fn(&W, &Expr) -> ScenResult<Value> + Send + Sync>;
type ImplicitResolver<W> = Arc<dyn Fn(&W) -> ScenResult<Value> + Send + Sync>;

enum ArgResolver<W> {
    /// Resolves an expression slice from the argument tail.
    Expr(ExprResolver<W>),
    /// Resolves from the world alone, consuming no tokens.
    Implicit(ImplicitResolver<W>),
}

impl<W> Clone for ArgResolver<W> {
    fn clone(&self) -> Self {
        match self {
            ArgResolver::Expr(f) => ArgResolver::Expr(Arc::clone(f)),
            ArgResolver::Implicit(f) => ArgResolver::Implicit(Arc::clone(f)),
        }
    }
}

/// An argument descriptor: a name, a resolver, and the modifiers that
/// control how the binding fold feeds tokens to it.
///
/// Constructed once at descriptor-registration time; stateless thereafter.
pub struct Arg<W> {
    name: &'static str,
    resolver: ArgResolver<W>,
    default: Option<Value>,
    variadic: bool,
    mapped: bool,
    nullable: bool,
    rescue: Option<Value>,
}

impl<W> Clone for Arg<W> {
    fn clone(&self) -> Self {
        Arg {
            name: self.name,
            resolver: self.resolver.clone(),
            default: self.default.clone(),
            variadic: self.variadic,
            mapped: self.mapped,
            nullable: self.nullable,
            rescue: self.rescue.clone(),
        }
    }
}

impl<W> Arg<W> {
    /// A positional argument resolved from one token of the tail.
    pub fn new(
        name: &'static str,
        resolver: impl Fn(&W, &Expr) -> ScenResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Arg {
            name,
            resolver: ArgResolver::Expr(Arc::new(resolver)),
            default: None,
            variadic: false,
            mapped: false,
            nullable: false,
            rescue: None,
        }
    }

    /// An implicit argument: resolved from the world alone, consuming no
    /// tokens.
    pub fn implicit(
        name: &'static str,
        resolver: impl Fn(&W) -> ScenResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Arg {
            name,
            resolver: ArgResolver::Implicit(Arc::new(resolver)),
            default: None,
            variadic: false,
            mapped: false,
            nullable: false,
            rescue: None,
        }
    }

    /// Value bound when no token remains for a positional argument.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Consume the entire remaining tail.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Resolve list elements independently instead of as one expression.
    pub fn mapped(mut self) -> Self {
        self.mapped = true;
        self
    }

    /// Bind `Nothing` when the tail is already empty.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Fallback value substituted when the resolver fails; the original
    /// error is swallowed.
    pub fn with_rescue(mut self, value: Value) -> Self {
        self.rescue = Some(value);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn is_implicit(&self) -> bool {
        matches!(self.resolver, ArgResolver::Implicit(_))
    }

    pub(crate) fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub(crate) fn is_mapped(&self) -> bool {
        self.mapped
    }

    pub(crate) fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub(crate) fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub(crate) fn rescue_value(&self) -> Option<&Value> {
        self.rescue.as_ref()
    }

    pub(crate) fn resolve(&self, world: &W, expr: &Expr) -> ScenResult<Value> {
        match &self.resolver {
            ArgResolver::Expr(f) => f(world, expr),
            ArgResolver::Implicit(_) => Err(ScenError::new(format!(
                "implicit argument `{}` resolved with an expression",
                self.name
            ))),
        }
    }

    pub(crate) fn resolve_implicit(&self, world: &W) -> ScenResult<Value> {
        match &self.resolver {
            ArgResolver::Implicit(f) => f(world),
            ArgResolver::Expr(_) => Err(ScenError::new(format!(
                "argument `{}` resolved without an expression",
                self.name
            ))),
        }
    }
}
