use crate::error::DispatchError;
use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

use super::core::Registry;

/// Versioned pointer to the current registry of one application.
///
/// Readers take a snapshot without locking and keep it for the whole request;
/// publication swaps the pointer under a single writer lock. A snapshot already
/// handed out is never mutated, so in-flight requests keep resolving against
/// the generation they started with.
#[derive(Default)]
pub struct RegistryHandle {
    current: ArcSwapOption<Registry>,
    generation: AtomicU64,
    publish_lock: Mutex<()>,
}

impl RegistryHandle {
    /// A handle with nothing published yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle with `registry` published as generation 1.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        let handle = Self::new();
        handle.publish(registry);
        handle
    }

    /// Publish a new generation and return its number.
    pub fn publish(&self, mut registry: Registry) -> u64 {
        let _guard = self
            .publish_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = self.generation.load(Ordering::Acquire) + 1;
        registry.generation = generation;
        let components = registry.len();
        self.current.store(Some(Arc::new(registry)));
        self.generation.store(generation, Ordering::Release);
        info!(generation, components, "Registry generation published");
        generation
    }

    /// The current snapshot, or `None` if nothing was ever published.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Registry>> {
        self.current.load_full()
    }

    /// Last published generation; `0` if none.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

/// Registry handles of every known application, keyed by application name.
#[derive(Default)]
pub struct AppTable {
    apps: DashMap<String, Arc<RegistryHandle>>,
}

impl AppTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `app`, creating an empty one on first use.
    pub fn register_app(&self, app: &str) -> Arc<RegistryHandle> {
        Arc::clone(self.apps.entry(app.to_string()).or_default().value())
    }

    /// Publish a new registry generation for `app`.
    pub fn publish(&self, app: &str, registry: Registry) -> u64 {
        self.register_app(app).publish(registry)
    }

    #[must_use]
    pub fn handle(&self, app: &str) -> Option<Arc<RegistryHandle>> {
        self.apps.get(app).map(|h| Arc::clone(h.value()))
    }

    /// Snapshot the current registry of `app`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MissingApplicationData`] when the application is
    /// unknown or its build never published a registry.
    pub fn snapshot(&self, app: &str) -> Result<Arc<Registry>, DispatchError> {
        self.handle(app)
            .and_then(|h| h.snapshot())
            .ok_or_else(|| DispatchError::MissingApplicationData {
                app: app.to_string(),
            })
    }

    /// Known application names, sorted.
    #[must_use]
    pub fn apps(&self) -> Vec<String> {
        let mut names: Vec<String> = self.apps.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }
}
