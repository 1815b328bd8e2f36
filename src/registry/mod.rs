//! # Registry Module
//!
//! The component registry maps component names to their descriptors. It is
//! produced by an external build step and consumed read-only by dispatch.
//!
//! ## Snapshots
//!
//! A [`Registry`] is immutable. Each application owns a [`RegistryHandle`]
//! that holds the current generation behind an `ArcSwapOption`:
//!
//! - readers call [`RegistryHandle::snapshot`] once per request and keep the
//!   returned `Arc<Registry>` for the whole resolution
//! - the build step calls [`RegistryHandle::publish`] to swap in a new
//!   generation; requests already in flight keep their old snapshot
//!
//! A request therefore never mixes entries from two generations.
//!
//! The [`AppTable`] groups handles by application name. An application with no
//! published generation yields [`crate::DispatchError::MissingApplicationData`].

mod core;
mod snapshot;

pub use core::{Registry, RegistryBuilder};
pub use snapshot::{AppTable, RegistryHandle};
