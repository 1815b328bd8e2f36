use crate::component::RenderArgs;
use crate::context::RequestContext;
use crate::dispatcher::invoke;
use crate::error::DispatchError;
use crate::router::component_call;
use tracing::{debug, warn};

use super::value::{ActionResult, ComponentCall, Ewc, Output};

/// Recursive EWC resolver for one request.
///
/// Every nested component reference resolves against the registry snapshot
/// pinned in the context. Recursion depth follows the shape of the component
/// graph; a component that embeds itself without end exhausts the stack.
pub struct Resolver<'a> {
    ctx: &'a RequestContext,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(ctx: &'a RequestContext) -> Self {
        Self { ctx }
    }

    /// Resolve a top-level value.
    ///
    /// # Errors
    ///
    /// Any fatal condition met at any depth aborts the whole resolution; no
    /// partial output is returned.
    pub fn resolve(&self, value: Ewc) -> Result<Output, DispatchError> {
        self.ewc(value, 0)
    }

    fn ewc(&self, value: Ewc, depth: usize) -> Result<Output, DispatchError> {
        match value {
            Ewc::List(items) => {
                let mut outputs = Vec::with_capacity(items.len());
                for item in items {
                    outputs.push(self.ewc(item, depth + 1)?);
                }
                Ok(Output::List(outputs))
            }
            Ewc::Data(payload) => Ok(Output::Value(payload)),
            Ewc::ComponentRef {
                name,
                action,
                params,
            } => {
                let call = component_call(self.ctx.registry(), &name, &action, params)?;
                self.call(call, depth)
            }
            Ewc::ComponentCall(call) => self.call(call, depth),
            Ewc::Redirect(redirect) => Ok(Output::Redirect(redirect.location(self.ctx.app_root()))),
            Ewc::Page(path) => Ok(Output::Page(path)),
            Ewc::Raw(value) => Ok(Output::Raw(value)),
        }
    }

    fn call(&self, call: ComponentCall, depth: usize) -> Result<Output, DispatchError> {
        match invoke(self.ctx, &call)? {
            ActionResult::Data(payload) => self.render(&call, Output::Value(payload), depth),
            ActionResult::Redirect(redirect) => {
                Ok(Output::Redirect(redirect.location(self.ctx.app_root())))
            }
            ActionResult::Embed(inner) => match self.ewc(inner, depth + 1)? {
                redirect @ Output::Redirect(_) => Ok(redirect),
                resolved => self.render(&call, resolved, depth),
            },
            ActionResult::Final(response) => {
                if depth == 0 {
                    Ok(Output::Final(Box::new(response)))
                } else {
                    Err(invalid_shape(&call, depth))
                }
            }
        }
    }

    /// Apply the component's view hook for the called action, if it has one.
    fn render(&self, call: &ComponentCall, input: Output, depth: usize) -> Result<Output, DispatchError> {
        let component = call.component.name();
        let action = call.action.name();
        let Some(hook) = call.component.view().hook(action) else {
            debug!(component, action, "No view hook; output passed through");
            return Ok(input);
        };

        let args = RenderArgs {
            ctx: self.ctx,
            component,
            action,
        };
        let output = hook(&args, input).map_err(|source| DispatchError::RenderFailed {
            component: component.to_string(),
            action: action.to_string(),
            source,
        })?;
        debug!(component, action, depth, "View hook applied");

        if depth > 0 && output.contains_final() {
            return Err(invalid_shape(call, depth));
        }
        Ok(output)
    }
}

fn invalid_shape(call: &ComponentCall, depth: usize) -> DispatchError {
    warn!(
        component = call.component.name(),
        action = call.action.name(),
        depth,
        "Final response produced below the top level"
    );
    DispatchError::InvalidResponseShape {
        component: call.component.name().to_string(),
        action: call.action.name().to_string(),
        depth,
    }
}
