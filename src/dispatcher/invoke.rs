//! Action invoker: the visibility gate and the call into a controller action.

use crate::component::ActionArgs;
use crate::context::RequestContext;
use crate::error::DispatchError;
use crate::ewc::{ActionResult, ComponentCall};
use std::time::Instant;
use tracing::{error, info, warn};

/// Refuse a path-originated call to a private controller.
///
/// Only requests arriving straight from the path resolver pass through this
/// gate; nested references to private components are legal.
///
/// # Errors
///
/// [`DispatchError::IllegalRequest`] when the controller is private.
pub fn check_visibility(call: &ComponentCall) -> Result<(), DispatchError> {
    if call.component.is_private() {
        warn!(
            component = call.component.name(),
            action = call.action.name(),
            "Direct request to private component refused"
        );
        return Err(DispatchError::IllegalRequest {
            component: call.component.name().to_string(),
        });
    }
    Ok(())
}

/// Invoke the bound action with the context first, then its positional params.
///
/// # Errors
///
/// [`DispatchError::ActionFailed`] when the action reports an error.
pub fn invoke(ctx: &RequestContext, call: &ComponentCall) -> Result<ActionResult, DispatchError> {
    let component = call.component.name();
    let action = call.action.name();
    let args = ActionArgs {
        ctx,
        component,
        action,
        params: &call.params,
    };

    let start = Instant::now();
    match call.action.call(&args) {
        Ok(result) => {
            info!(
                request_id = %ctx.request_id(),
                component,
                action,
                arity = call.action.arity(),
                result = kind(&result),
                latency_us = start.elapsed().as_micros() as u64,
                "Action invoked"
            );
            Ok(result)
        }
        Err(source) => {
            error!(
                request_id = %ctx.request_id(),
                component,
                action,
                error = %source,
                "Action failed"
            );
            Err(DispatchError::ActionFailed {
                component: component.to_string(),
                action: action.to_string(),
                source,
            })
        }
    }
}

fn kind(result: &ActionResult) -> &'static str {
    match result {
        ActionResult::Data(_) => "data",
        ActionResult::Redirect(_) => "redirect",
        ActionResult::Embed(_) => "embed",
        ActionResult::Final(_) => "final",
    }
}
