//! # Component Module
//!
//! A component is the unit of routable functionality: a named controller
//! holding arity-specific actions, plus an optional view with per-action
//! render hooks.
//!
//! Components are described with a [`ComponentBuilder`] and frozen into a
//! [`ComponentDescriptor`] when a registry is built. Nothing is looked up by
//! reflection: the `(action name, arity)` table is filled explicitly.
//!
//! ```rust
//! use ewcrouter::component::ComponentDescriptor;
//! use ewcrouter::ewc::{ActionResult, Output};
//! use serde_json::json;
//!
//! let blog = ComponentDescriptor::builder("blog")
//!     .action("show", 2, |args| {
//!         let id = args.param_str(0).unwrap_or_default();
//!         Ok(ActionResult::Data(json!({ "id": id })))
//!     })
//!     .view("show", |_, out| match out {
//!         Output::Value(post) => Ok(Output::Markup(format!("<article>{}</article>", post["id"]))),
//!         other => Ok(other),
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert!(blog.resolve_action("show", 2).is_some());
//! assert!(blog.resolve_action("show", 1).is_none());
//! ```

mod core;
mod scaffold;

pub use core::{
    Action, ActionArgs, ActionFn, ActionHandle, ComponentBuilder, ComponentDescriptor, Controller,
    RenderArgs, RenderFn, View, Visibility, CONTEXT_ARITY,
};
pub use scaffold::Resource;
