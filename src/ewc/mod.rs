//! # EWC Module
//!
//! The Embeddable Web Component protocol: the [`Ewc`] tagged union, the
//! [`ActionResult`] a controller action returns, the resolved [`Output`]
//! form, and the recursive [`Resolver`].
//!
//! ## Resolution
//!
//! | Value | Result |
//! |---|---|
//! | `List(items)` | every item resolved in order; one failure fails the list |
//! | `Data(payload)` | `Output::Value(payload)`, no view applied |
//! | `ComponentRef` | looked up in the pinned registry, then treated as a call |
//! | `ComponentCall` | action invoked, result classified (below) |
//! | `Redirect` | target joined below the app root |
//! | `Page` / `Raw` | passed through |
//!
//! A call's [`ActionResult`] is classified as:
//!
//! - `Data` → the component's view hook for that action, if any, else unchanged
//! - `Redirect` → terminal, no view
//! - `Embed(ewc)` → `ewc` is resolved first, then the *calling* component's view
//!   hook wraps the result, so an outer component frames the inner one
//! - `Final` → passed through at the top level, [`crate::DispatchError::InvalidResponseShape`]
//!   anywhere below it
//!
//! A redirect produced by an embedded resolution short-circuits the wrapping
//! view of its caller.

mod redirect;
mod resolver;
mod value;

pub use redirect::{coerce_segment, Location, Redirect, RedirectScope};
pub use resolver::Resolver;
pub use value::{ActionResult, ComponentCall, Ewc, Output, Params, MAX_INLINE_PARAMS};
