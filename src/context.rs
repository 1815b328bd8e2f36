//! # Request Context
//!
//! The inbound [`Request`] as handed over by a transport adapter, and the
//! read-only [`RequestContext`] threaded through every resolution step of a
//! single request.
//!
//! The context is the only source of "which app", "which path" and "redirect
//! base" information. It also pins the [`Registry`] snapshot chosen when the
//! request entered the dispatcher, so every nested component reference
//! resolves against the same generation even if a new one is published
//! mid-request.

use crate::ids::RequestId;
use crate::registry::Registry;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// Header carrying an upstream correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Inbound request as seen by the dispatcher.
#[derive(Debug, Clone)]
pub struct Request {
    /// Application name used to select the registry
    pub app: String,
    /// Application root; `None` falls back to the configured default
    pub app_root: Option<String>,
    /// Full request path, possibly with a query string
    pub path: String,
    /// Upstream correlation id, if any
    pub request_id: Option<String>,
    /// Facts seeded into the context metadata before dispatch
    pub metadata: Vec<(String, Value)>,
}

impl Request {
    #[must_use]
    pub fn new(app: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            app_root: None,
            path: path.into(),
            request_id: None,
            metadata: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_app_root(mut self, app_root: impl Into<String>) -> Self {
        self.app_root = Some(app_root.into());
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.push((key.into(), value));
        self
    }

    /// Build a request from an `http::Request`, taking the path from the URI and
    /// the correlation id from the `x-request-id` header.
    #[must_use]
    pub fn from_http<B>(app: impl Into<String>, req: &http::Request<B>) -> Self {
        let path = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.uri().path().to_string(), |pq| pq.as_str().to_string());
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Self {
            app: app.into(),
            app_root: None,
            path,
            request_id,
            metadata: vec![(
                "method".to_string(),
                Value::String(req.method().as_str().to_string()),
            )],
        }
    }
}

/// Append-only per-request fact store.
///
/// Keys can be added but never overwritten or removed, so facts recorded by an
/// outer component are stable for every component it embeds.
#[derive(Debug, Default)]
pub struct Metadata {
    entries: DashMap<String, Value>,
}

impl Metadata {
    /// Record a fact. Returns `false` and keeps the existing value if the key is
    /// already present.
    pub fn append(&self, key: impl Into<String>, value: Value) -> bool {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only request state shared by every resolution step of one request.
#[derive(Debug)]
pub struct RequestContext {
    request_id: RequestId,
    app: String,
    app_root: String,
    path: String,
    registry: Arc<Registry>,
    metadata: Metadata,
}

impl RequestContext {
    /// Create a context pinned to `registry`.
    #[must_use]
    pub fn new(
        app: impl Into<String>,
        app_root: impl Into<String>,
        path: impl Into<String>,
        registry: Arc<Registry>,
    ) -> Self {
        Self {
            request_id: RequestId::new(),
            app: app.into(),
            app_root: app_root.into(),
            path: path.into(),
            registry,
            metadata: Metadata::default(),
        }
    }

    /// Create a context for an inbound request, using `default_app_root` when
    /// the request does not carry its own root.
    #[must_use]
    pub fn from_request(request: Request, default_app_root: &str, registry: Arc<Registry>) -> Self {
        let Request {
            app,
            app_root,
            path,
            request_id,
            metadata,
        } = request;
        let ctx = Self {
            request_id: RequestId::from_header_or_new(request_id.as_deref()),
            app,
            app_root: app_root.unwrap_or_else(|| default_app_root.to_string()),
            path,
            registry,
            metadata: Metadata::default(),
        };
        for (key, value) in metadata {
            ctx.metadata.append(key, value);
        }
        ctx
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn app(&self) -> &str {
        &self.app
    }

    #[must_use]
    pub fn app_root(&self) -> &str {
        &self.app_root
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The registry snapshot this request resolves against.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_is_append_only() {
        let meta = Metadata::default();
        assert!(meta.append("user", json!("ada")));
        assert!(!meta.append("user", json!("mallory")));
        assert_eq!(meta.get("user"), Some(json!("ada")));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_from_request_uses_default_root() {
        let registry = Arc::new(Registry::empty());
        let req = Request::new("shop", "/cart").with_metadata("locale", json!("en"));
        let ctx = RequestContext::from_request(req, "/shop", registry);
        assert_eq!(ctx.app_root(), "/shop");
        assert_eq!(ctx.metadata().get("locale"), Some(json!("en")));
    }

    #[test]
    fn test_from_http_copies_path_and_request_id() {
        let id = RequestId::new();
        let http_req = http::Request::builder()
            .method("GET")
            .uri("/blog/show/7?draft=1")
            .header(REQUEST_ID_HEADER, id.to_string())
            .body(())
            .unwrap();
        let req = Request::from_http("blog", &http_req);
        assert_eq!(req.path, "/blog/show/7?draft=1");
        let ctx = RequestContext::from_request(req, "/", Arc::new(Registry::empty()));
        assert_eq!(ctx.request_id(), id);
        assert_eq!(ctx.metadata().get("method"), Some(json!("GET")));
    }
}
