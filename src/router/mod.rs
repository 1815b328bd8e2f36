//! # Router Module
//!
//! The router turns a request path into the first embeddable value of a
//! request: either a bound [`crate::ewc::ComponentCall`] or a
//! [`crate::ewc::Ewc::Page`] passthrough for paths that name no component.
//!
//! ## Path Layout
//!
//! Below the application root, a path is split on `/`:
//!
//! ```text
//! /                      -> Page("/index.html")
//! /blog                  -> blog/index   (arity 1)
//! /blog/show/42          -> blog/show    (arity 2, params ["42"])
//! /blog/archive/2024/05  -> blog/archive (arity 3, params ["2024", "05"])
//! /static/logo.png       -> Page("/static/logo.png") if no "static" component
//! ```
//!
//! Component lookup is exact and case-sensitive. Action lookup matches name
//! *and* arity, so `/blog/show` never reaches `show/2`.
//!
//! ## Example
//!
//! ```rust
//! use ewcrouter::component::ComponentDescriptor;
//! use ewcrouter::ewc::{ActionResult, Ewc};
//! use ewcrouter::registry::Registry;
//! use ewcrouter::router::Router;
//! use serde_json::json;
//!
//! let registry = Registry::builder()
//!     .component(
//!         ComponentDescriptor::builder("blog")
//!             .action("show", 2, |_| Ok(ActionResult::Data(json!(null)))),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let router = Router::default();
//! let resolved = router.resolve("/app/blog/show/42", "/app", &registry).unwrap();
//! assert!(matches!(resolved, Ewc::ComponentCall(ref call) if call.params[0] == json!("42")));
//!
//! let page = router.resolve("/app/favicon.ico", "/app", &registry).unwrap();
//! assert!(matches!(page, Ewc::Page(ref p) if p == "/app/favicon.ico"));
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::{component_call, Router, SegmentVec, MAX_INLINE_SEGMENTS};
