//! Dispatcher core module - top-level request entry.

use crate::context::{Request, RequestContext};
use crate::error::DispatchError;
use crate::ewc::{Ewc, Resolver};
use crate::registry::{AppTable, Registry};
use crate::response::{compose, FinalResponse};
use crate::router::Router;
use crate::runtime_config::DispatchConfig;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span};

use super::invoke::check_visibility;

/// Top-level entry point consumed by a transport layer.
///
/// Holds the per-application registry table and the path resolver. Each call
/// to [`Dispatcher::handle`] pins one registry snapshot, resolves the request
/// synchronously, and composes the final response.
pub struct Dispatcher {
    apps: Arc<AppTable>,
    router: Router,
    config: DispatchConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl Dispatcher {
    /// Create a dispatcher with its own, empty application table.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_apps(config, Arc::new(AppTable::new()))
    }

    /// Create a dispatcher sharing `apps` with a build step that publishes into it.
    #[must_use]
    pub fn with_apps(config: DispatchConfig, apps: Arc<AppTable>) -> Self {
        Self {
            apps,
            router: Router::from_config(&config),
            config,
        }
    }

    #[must_use]
    pub fn apps(&self) -> &AppTable {
        &self.apps
    }

    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Publish a registry generation for `app`.
    pub fn publish(&self, app: &str, registry: Registry) -> u64 {
        self.apps.publish(app, registry)
    }

    /// Resolve a request into its final response.
    ///
    /// # Errors
    ///
    /// Every [`DispatchError`] is fatal to the request. A path naming no
    /// component is not an error; it yields [`FinalResponse::Page`].
    pub fn handle(&self, request: Request) -> Result<FinalResponse, DispatchError> {
        let registry = self.apps.snapshot(&request.app).inspect_err(|e| {
            error!(app = %request.app, path = %request.path, error = %e, "Request rejected");
        })?;
        let ctx = RequestContext::from_request(request, &self.config.app_root, registry);
        self.handle_context(&ctx)
    }

    /// Resolve a request whose context (and registry snapshot) is already built.
    ///
    /// # Errors
    ///
    /// See [`Dispatcher::handle`].
    pub fn handle_context(&self, ctx: &RequestContext) -> Result<FinalResponse, DispatchError> {
        let span = info_span!(
            "request",
            request_id = %ctx.request_id(),
            app = ctx.app(),
            path = ctx.path(),
            generation = ctx.registry().generation()
        );
        let _enter = span.enter();
        let start = Instant::now();

        let result = self.resolve(ctx);
        match &result {
            Ok(response) => info!(
                outcome = response.kind(),
                latency_us = start.elapsed().as_micros() as u64,
                "Request resolved"
            ),
            Err(e) => error!(
                error = %e,
                status = e.status().as_u16(),
                latency_us = start.elapsed().as_micros() as u64,
                "Request failed"
            ),
        }
        result
    }

    fn resolve(&self, ctx: &RequestContext) -> Result<FinalResponse, DispatchError> {
        let entry = self
            .router
            .resolve(ctx.path(), ctx.app_root(), ctx.registry())?;
        if let Ewc::ComponentCall(call) = &entry {
            check_visibility(call)?;
        }
        debug!(entry = ?entry, "Resolving entry value");
        let output = Resolver::new(ctx).resolve(entry)?;
        Ok(compose(output))
    }
}
