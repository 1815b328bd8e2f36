//! Router core module - path resolution on the request hot path.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::component::{ComponentDescriptor, CONTEXT_ARITY};
use crate::error::DispatchError;
use crate::ewc::{ComponentCall, Ewc, Params};
use crate::registry::Registry;
use crate::runtime_config::DispatchConfig;
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Maximum path segments kept inline before heap allocation.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Routable path segments, borrowed from the request path.
pub type SegmentVec<'a> = SmallVec<[&'a str; MAX_INLINE_SEGMENTS]>;

/// Path resolver: maps a request path to a component call or a page passthrough.
///
/// - no segment → `Page(index_page)`
/// - `/name` → `name/default_action` with no parameters
/// - `/name/action/p1/..` → `name/action` with string parameters
///
/// Arity always counts the leading request context, so `/blog/show/3` looks up
/// `show/2`. An unknown component name is not an error: the request is handed
/// back as `Page(original_path)` for plain-resource handling.
#[derive(Debug, Clone)]
pub struct Router {
    default_action: String,
    index_page: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("index", "/index.html")
    }
}

impl Router {
    #[must_use]
    pub fn new(default_action: impl Into<String>, index_page: impl Into<String>) -> Self {
        Self {
            default_action: default_action.into(),
            index_page: index_page.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.default_action.as_str(), config.index_page.as_str())
    }

    #[must_use]
    pub fn default_action(&self) -> &str {
        &self.default_action
    }

    /// Split the part of `path` below `app_root` into non-empty segments.
    ///
    /// Query string and fragment are dropped. A path outside `app_root` is
    /// split as a whole.
    #[must_use]
    pub fn routable_segments<'p>(path: &'p str, app_root: &str) -> SegmentVec<'p> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let root = app_root.trim_end_matches('/');
        let below_root = if root.is_empty() {
            path
        } else {
            match path.strip_prefix(root) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => path,
            }
        };
        below_root.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Resolve a request path against `registry`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::NoSuchAction`] when the component exists but does not
    /// export the requested action with the requested arity.
    pub fn resolve(&self, path: &str, app_root: &str, registry: &Registry) -> Result<Ewc, DispatchError> {
        let segments = Self::routable_segments(path, app_root);

        let Some((&name, rest)) = segments.split_first() else {
            debug!(path, index_page = %self.index_page, "No segments; serving index page");
            return Ok(Ewc::Page(self.index_page.clone()));
        };

        let Some(component) = registry.lookup(name) else {
            debug!(path, component = name, "Unknown component; page passthrough");
            return Ok(Ewc::Page(path.to_string()));
        };

        let (action, params) = match rest.split_first() {
            Some((&action, params)) => (action, params),
            None => (self.default_action.as_str(), &[][..]),
        };
        let params: Params = params.iter().map(|p| Value::String((*p).to_string())).collect();

        debug!(
            path,
            component = name,
            action,
            arity = params.len() + CONTEXT_ARITY,
            generation = registry.generation(),
            "Path resolved to component"
        );
        bind(component, action, params).map(Ewc::ComponentCall)
    }
}

/// Resolve an explicit `name/action` reference against `registry`.
///
/// Unlike [`Router::resolve`], an unknown component is fatal here: the caller
/// asked for that component by name.
///
/// # Errors
///
/// [`DispatchError::NoSuchComponent`] or [`DispatchError::NoSuchAction`].
pub fn component_call(
    registry: &Registry,
    name: &str,
    action: &str,
    params: impl IntoIterator<Item = Value>,
) -> Result<ComponentCall, DispatchError> {
    let component = registry
        .lookup(name)
        .ok_or_else(|| DispatchError::NoSuchComponent {
            name: name.to_string(),
        })?;
    bind(component, action, params.into_iter().collect())
}

fn bind(
    component: Arc<ComponentDescriptor>,
    action: &str,
    params: Params,
) -> Result<ComponentCall, DispatchError> {
    let arity = params.len() + CONTEXT_ARITY;
    match component.resolve_action(action, arity) {
        Some(handle) => Ok(ComponentCall {
            component,
            action: handle,
            params,
        }),
        None => Err(DispatchError::NoSuchAction {
            component: component.name().to_string(),
            action: action.to_string(),
            arity,
        }),
    }
}
