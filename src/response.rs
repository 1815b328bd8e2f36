//! # Response Composer
//!
//! Wraps the top-level resolved [`Output`] into the response protocol handed to
//! the transport layer.
//!
//! - text output becomes an HTML body
//! - redirects, pages and opaque values are already tagged and pass through
//! - a top-level list has each member tagged individually
//!
//! Tagging is applied to exactly one level. A list nested inside the top-level
//! list is forwarded as [`FinalResponse::Untagged`], with its members left as
//! resolved. Transports that need deeper tagging must walk it themselves.

use crate::ewc::{Location, Output, RedirectScope};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Response protocol consumed by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FinalResponse {
    /// HTML body
    Html(String),
    /// Redirect, local to the app root or absolute
    Redirect(Location),
    /// Not a component; serve the path as a plain resource
    Page(String),
    /// Opaque value, e.g. custom headers, forwarded unchanged
    Passthrough(Value),
    /// Ordered list of tagged members
    List(Vec<FinalResponse>),
    /// Nested output below the tagged level, forwarded as resolved
    Untagged(Output),
}

impl FinalResponse {
    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FinalResponse::Html(_) => "html",
            FinalResponse::Redirect(_) => "redirect",
            FinalResponse::Page(_) => "page",
            FinalResponse::Passthrough(_) => "passthrough",
            FinalResponse::List(_) => "list",
            FinalResponse::Untagged(_) => "untagged",
        }
    }

    /// Status a transport should answer with, when the response determines one.
    ///
    /// Pages and passthrough values are left to the transport.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FinalResponse::Html(_) | FinalResponse::List(_) | FinalResponse::Untagged(_) => {
                Some(StatusCode::OK)
            }
            FinalResponse::Redirect(_) => Some(StatusCode::FOUND),
            FinalResponse::Page(_) | FinalResponse::Passthrough(_) => None,
        }
    }

    /// `true` for a redirect relative to the application root.
    #[must_use]
    pub fn is_local_redirect(&self) -> bool {
        matches!(self, FinalResponse::Redirect(loc) if loc.scope == RedirectScope::Local)
    }
}

/// Compose the top-level output of a request.
#[must_use]
pub fn compose(output: Output) -> FinalResponse {
    match output {
        Output::List(items) => FinalResponse::List(items.into_iter().map(tag).collect()),
        other => tag(other),
    }
}

fn tag(output: Output) -> FinalResponse {
    match output {
        Output::Markup(html) | Output::Value(Value::String(html)) => FinalResponse::Html(html),
        Output::Value(value) | Output::Raw(value) => FinalResponse::Passthrough(value),
        Output::Redirect(location) => FinalResponse::Redirect(location),
        Output::Page(path) => FinalResponse::Page(path),
        Output::Final(response) => *response,
        nested @ Output::List(_) => FinalResponse::Untagged(nested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_becomes_html() {
        assert_eq!(
            compose(Output::markup("<p>hi</p>")),
            FinalResponse::Html("<p>hi</p>".to_string())
        );
        assert_eq!(
            compose(Output::Value(json!("plain"))),
            FinalResponse::Html("plain".to_string())
        );
    }

    #[test]
    fn test_tagged_outputs_pass_through() {
        let headers = json!({ "header": ["x-frame-options", "DENY"] });
        assert_eq!(
            compose(Output::Raw(headers.clone())),
            FinalResponse::Passthrough(headers)
        );
        let final_response = FinalResponse::Page("/robots.txt".to_string());
        assert_eq!(
            compose(Output::Final(Box::new(final_response.clone()))),
            final_response
        );
    }

    #[test]
    fn test_only_one_level_is_tagged() {
        let output = Output::List(vec![
            Output::markup("a"),
            Output::List(vec![Output::markup("b")]),
        ]);
        assert_eq!(
            compose(output),
            FinalResponse::List(vec![
                FinalResponse::Html("a".to_string()),
                FinalResponse::Untagged(Output::List(vec![Output::markup("b")])),
            ])
        );
    }

    #[test]
    fn test_status() {
        let redirect = FinalResponse::Redirect(Location {
            scope: RedirectScope::Local,
            path: "/app/foo/bar".to_string(),
        });
        assert_eq!(redirect.status(), Some(StatusCode::FOUND));
        assert!(redirect.is_local_redirect());
        assert_eq!(FinalResponse::Page("/x".to_string()).status(), None);
    }
}
