//! # Dispatcher Module
//!
//! The dispatcher is the request entry point and the action invoker.
//!
//! ## Request Flow
//!
//! 1. Pin the application's current registry snapshot (or fail with
//!    `MissingApplicationData`)
//! 2. Resolve the path into a component call or a page passthrough
//! 3. Refuse the call if the controller is private (top level only)
//! 4. Resolve the value recursively through [`crate::ewc::Resolver`], which
//!    invokes actions through [`invoke`]
//! 5. Compose the resolved output into a [`crate::response::FinalResponse`]
//!
//! ## Concurrency
//!
//! Resolution is plain call/return on the caller's thread: no channels, no
//! suspension points, no locks on the read path. Concurrent requests share
//! only immutable registry snapshots. There is no timeout or cancellation in
//! the core; the transport owns request time limits.
//!
//! ## Example
//!
//! ```rust
//! use ewcrouter::component::ComponentDescriptor;
//! use ewcrouter::context::Request;
//! use ewcrouter::dispatcher::Dispatcher;
//! use ewcrouter::ewc::{ActionResult, Output};
//! use ewcrouter::registry::Registry;
//! use ewcrouter::response::FinalResponse;
//! use serde_json::json;
//!
//! let dispatcher = Dispatcher::default();
//! dispatcher.publish(
//!     "site",
//!     Registry::builder()
//!         .component(
//!             ComponentDescriptor::builder("hello")
//!                 .action("index", 1, |_| Ok(ActionResult::Data(json!("world"))))
//!                 .view("index", |_, out| {
//!                     Ok(Output::markup(format!("<p>hello {}</p>", out.as_text().unwrap_or_default())))
//!                 }),
//!         )
//!         .build()
//!         .unwrap(),
//! );
//!
//! let response = dispatcher.handle(Request::new("site", "/hello")).unwrap();
//! assert_eq!(response, FinalResponse::Html("<p>hello world</p>".to_string()));
//! ```

mod core;
mod invoke;

pub use core::Dispatcher;
pub use invoke::{check_visibility, invoke};
