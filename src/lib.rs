//! # ewcrouter
//!
//! **ewcrouter** is the request-dispatch core of a component-based web
//! framework. Given a request path and a registry of components, it resolves
//! the path to a component action, invokes it, runs the result through the
//! component's view, and composes a structured response: an HTML body, a
//! redirect, or a raw passthrough.
//!
//! ## Overview
//!
//! The defining feature is the **Embeddable Web Component** (EWC) protocol. A
//! controller action may return plain data for its view, a redirect, a finished
//! response, or *another embeddable value*: a reference to a second component,
//! a list of components, or opaque data. Embedded values are resolved
//! recursively, and the calling component's view wraps the result, so pages
//! are composed from nested components.
//!
//! ## Architecture
//!
//! - **[`registry`]** - immutable component registry snapshots, swapped atomically per application
//! - **[`component`]** - components: controllers with `(action, arity)` tables and per-action view hooks
//! - **[`router`]** - path resolver (`/component/action/params...`)
//! - **[`dispatcher`]** - top-level entry point, visibility gate, action invoker
//! - **[`ewc`]** - the EWC value types and the recursive resolver
//! - **[`response`]** - response composer
//! - **[`context`]** - the per-request context threaded through resolution
//! - **[`runtime_config`]** - dispatch configuration from file and environment
//! - **[`telemetry`]** - structured logging setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant T as Transport
//!     participant D as Dispatcher
//!     participant R as Router
//!     participant E as Resolver
//!     participant A as Action
//!     participant V as View
//!
//!     T->>D: handle(Request)
//!     D->>D: pin registry snapshot
//!     D->>R: resolve(path)
//!     R-->>D: ComponentCall | Page
//!     D->>D: visibility gate
//!     D->>E: resolve(value)
//!     E->>A: invoke(ctx, params)
//!     A-->>E: Data | Redirect | Embed | Final
//!     E->>E: resolve embedded values (recursive)
//!     E->>V: wrap output
//!     E-->>D: Output
//!     D-->>T: FinalResponse
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use ewcrouter::prelude::*;
//! use serde_json::json;
//!
//! let registry = Registry::builder()
//!     .component(
//!         ComponentDescriptor::builder("layout")
//!             .action("index", 1, |_| Ok(Ewc::component("greeting", "index", Vec::<String>::new()).into()))
//!             .view("index", |_, inner| {
//!                 Ok(Output::markup(format!("<main>{}</main>", inner.as_text().unwrap_or_default())))
//!             }),
//!     )
//!     .component(
//!         ComponentDescriptor::builder("greeting")
//!             .private()
//!             .action("index", 1, |_| Ok(ActionResult::Data(json!("hello")))),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::default();
//! dispatcher.publish("site", registry);
//!
//! let response = dispatcher.handle(Request::new("site", "/layout")).unwrap();
//! assert_eq!(response, FinalResponse::Html("<main>hello</main>".to_string()));
//!
//! // private components can be embedded but not requested directly
//! assert!(dispatcher.handle(Request::new("site", "/greeting")).is_err());
//! ```
//!
//! ## Error Handling
//!
//! Fatal conditions are reported as [`DispatchError`] and abort the whole
//! request. A path that names no component is not an error: it resolves to a
//! page passthrough for the transport to serve.

pub mod component;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod ewc;
pub mod ids;
pub mod registry;
pub mod response;
pub mod router;
pub mod runtime_config;
pub mod telemetry;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;

/// Common imports for applications defining components.
pub mod prelude {
    pub use crate::component::{ActionArgs, ComponentDescriptor, RenderArgs, Resource};
    pub use crate::context::{Request, RequestContext};
    pub use crate::dispatcher::Dispatcher;
    pub use crate::error::DispatchError;
    pub use crate::ewc::{ActionResult, Ewc, Output, Redirect};
    pub use crate::registry::{AppTable, Registry};
    pub use crate::response::FinalResponse;
}
