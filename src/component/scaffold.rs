//! Default resource actions a component can opt into.
//!
//! A scaffolded component delegates `index/1`, `show/2` and `delete/2` to a
//! [`Resource`]. `show` redirects to `index` for an unknown id; `delete` of an
//! unknown id is an action error. Any of these can be overridden by exporting an action with
//! the same name and arity on the builder.

use crate::context::RequestContext;
use crate::ewc::ActionResult;
use anyhow::{bail, Result};
use serde_json::{json, Value};
use std::sync::Arc;

use super::core::{ActionArgs, ActionFn};

/// Data source behind the default actions.
pub trait Resource: Send + Sync + 'static {
    /// All records, in display order.
    fn list(&self, ctx: &RequestContext) -> Result<Vec<Value>>;

    /// A single record, `None` when the id is unknown.
    fn fetch(&self, ctx: &RequestContext, id: &str) -> Result<Option<Value>>;

    /// Remove a record. Returns `false` when the id was unknown.
    fn remove(&self, _ctx: &RequestContext, id: &str) -> Result<bool> {
        bail!("resource does not support removing '{id}'")
    }
}

fn id_param<'a>(args: &'a ActionArgs<'_>) -> Result<&'a str> {
    match args.param_str(0) {
        Some(id) => Ok(id),
        None => bail!("{}/{}: missing record id", args.component, args.action),
    }
}

pub(crate) fn default_actions(
    resource: Arc<dyn Resource>,
) -> Vec<(&'static str, usize, Box<ActionFn>)> {
    let list = Arc::clone(&resource);
    let index: Box<ActionFn> = Box::new(move |args: &ActionArgs<'_>| {
        let items = list.list(args.ctx)?;
        Ok(ActionResult::Data(json!({ "items": items })))
    });

    let fetch = Arc::clone(&resource);
    let show: Box<ActionFn> = Box::new(move |args: &ActionArgs<'_>| {
        let id = id_param(args)?;
        Ok(match fetch.fetch(args.ctx, id)? {
            Some(record) => ActionResult::Data(record),
            None => ActionResult::Redirect(args.redirect_to("index")),
        })
    });

    let remove = resource;
    let delete: Box<ActionFn> = Box::new(move |args: &ActionArgs<'_>| {
        let id = id_param(args)?;
        if !remove.remove(args.ctx, id)? {
            bail!("{}/{}: no record '{id}'", args.component, args.action);
        }
        Ok(ActionResult::Redirect(args.redirect_to("index")))
    });

    vec![("index", 1, index), ("show", 2, show), ("delete", 2, delete)]
}
