//! Fetchers: named dispatch targets that query the world for a value.

use crate::arg::Arg;
use crate::bind::{bind_args, matches_name};
use crate::params::Params;
use scen_expr::Expr;
use scen_value::{ScenResult, Value};
use std::sync::Arc;

type Handler<W> = Arc<dyn Fn(&W, &Params) -> ScenResult<Value> + Send + Sync>;

/// A fetcher descriptor: the pure-query counterpart of `Command`. Fetching
/// binds the expression's tail and invokes the handler, which reads the
/// world and returns a value; the world itself is untouched.
pub struct Fetcher<W> {
    doc: &'static str,
    name: &'static str,
    args: Vec<Arg<W>>,
    handler: Handler<W>,
    name_pos: usize,
    catchall: bool,
}

impl<W> Clone for Fetcher<W> {
    fn clone(&self) -> Self {
        Fetcher {
            doc: self.doc,
            name: self.name,
            args: self.args.clone(),
            handler: Arc::clone(&self.handler),
            name_pos: self.name_pos,
            catchall: self.catchall,
        }
    }
}

impl<W: Sync> Fetcher<W> {
    pub fn new(
        doc: &'static str,
        name: &'static str,
        args: Vec<Arg<W>>,
        handler: impl Fn(&W, &Params) -> ScenResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Fetcher {
            doc,
            name,
            args,
            handler: Arc::new(handler),
            name_pos: 0,
            catchall: false,
        }
    }

    /// Position of the name token within the normalized expression.
    pub fn with_name_pos(mut self, pos: usize) -> Self {
        self.name_pos = pos;
        self
    }

    /// Match any expression, consuming it whole as the argument tail.
    pub fn catchall(mut self) -> Self {
        self.catchall = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn doc(&self) -> &'static str {
        self.doc
    }

    pub(crate) fn matches(&self, expr: &Expr) -> bool {
        self.catchall || matches_name(expr, self.name, self.name_pos)
    }

    /// Bind and invoke.
    pub fn fetch(&self, world: &W, expr: &Expr) -> ScenResult<Value> {
        let params = bind_args(world, self.name, &self.args, expr, self.name_pos, self.catchall)?;
        (self.handler)(world, &params)
    }
}
