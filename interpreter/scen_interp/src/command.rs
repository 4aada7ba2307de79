//! Commands: named dispatch targets that act on the world.

use crate::arg::Arg;
use crate::bind::{bind_args, matches_name};
use crate::params::Params;
use scen_expr::Expr;
use scen_value::{missing_actor, ScenResult};
use std::sync::Arc;

type Handler<W> = Arc<dyn Fn(W, Option<&str>, &Params) -> ScenResult<W> + Send + Sync>;

/// A command descriptor. Processing binds the expression's tail against
/// the argument list, then invokes the handler with the world, the acting
/// account and the bound parameters; the handler returns the new world.
pub struct Command<W> {
    doc: &'static str,
    name: &'static str,
    args: Vec<Arg<W>>,
    handler: Handler<W>,
    name_pos: usize,
    catchall: bool,
    view: bool,
}

impl<W> Clone for Command<W> {
    fn clone(&self) -> Self {
        Command {
            doc: self.doc,
            name: self.name,
            args: self.args.clone(),
            handler: Arc::clone(&self.handler),
            name_pos: self.name_pos,
            catchall: self.catchall,
            view: self.view,
        }
    }
}

impl<W: Sync> Command<W> {
    pub fn new(
        doc: &'static str,
        name: &'static str,
        args: Vec<Arg<W>>,
        handler: impl Fn(W, Option<&str>, &Params) -> ScenResult<W> + Send + Sync + 'static,
    ) -> Self {
        Command {
            doc,
            name,
            args,
            handler: Arc::new(handler),
            name_pos: 0,
            catchall: false,
            view: false,
        }
    }

    /// An actor-less command: always invoked with no actor, even when the
    /// caller supplies one.
    pub fn view(
        doc: &'static str,
        name: &'static str,
        args: Vec<Arg<W>>,
        handler: impl Fn(W, &Params) -> ScenResult<W> + Send + Sync + 'static,
    ) -> Self {
        let mut command = Command::new(doc, name, args, move |world, _actor, params| {
            handler(world, params)
        });
        command.view = true;
        command
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

    pub fn is_view(&self) -> bool {
        self.view
    }

    pub(crate) fn matches(&self, expr: &Expr) -> bool {
        self.catchall || matches_name(expr, self.name, self.name_pos)
    }

    /// Bind and invoke. Non-view commands require an actor.
    pub fn process(&self, world: W, actor: Option<&str>, expr: &Expr) -> ScenResult<W> {
        let params = bind_args(&world, self.name, &self.args, expr, self.name_pos, self.catchall)?;
        if self.view {
            return (self.handler)(world, None, &params);
        }
        let actor = actor.ok_or_else(|| missing_actor(self.name))?;
        (self.handler)(world, Some(actor), &params)
    }
}
