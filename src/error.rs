use http::StatusCode;
use std::fmt;

/// Fatal dispatch failure.
///
/// Every variant aborts the whole request: no partial response is emitted and
/// nothing is retried. A top-level path that names no registered component is
/// *not* represented here; it degrades to a page passthrough instead.
#[derive(Debug)]
pub enum DispatchError {
    /// An explicitly constructed component reference named an unknown component.
    NoSuchComponent {
        /// The component name that failed to resolve
        name: String,
    },
    /// The component exists but exports no action with this name and arity.
    ///
    /// Arity counts the leading request context, so `/blog/show/3` asks for
    /// `show/2`.
    NoSuchAction {
        /// Component the lookup ran against
        component: String,
        /// Requested action name
        action: String,
        /// Requested arity, context included
        arity: usize,
    },
    /// A request arriving from the path resolver targeted a private controller.
    IllegalRequest {
        /// The private component
        component: String,
    },
    /// A nested resolution produced a finalized response, which only the
    /// top-level call may emit.
    InvalidResponseShape {
        /// Component whose action produced the response
        component: String,
        /// Action that produced it
        action: String,
        /// Nesting depth at which it was produced (0 is top level)
        depth: usize,
    },
    /// No registry snapshot has been published for the application.
    MissingApplicationData {
        /// Application name taken from the request
        app: String,
    },
    /// A controller action returned an application error.
    ActionFailed {
        /// Component owning the action
        component: String,
        /// Failing action
        action: String,
        /// Error reported by the action
        source: anyhow::Error,
    },
    /// A view hook returned an error while rendering.
    RenderFailed {
        /// Component owning the view
        component: String,
        /// Action whose hook failed
        action: String,
        /// Error reported by the hook
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// HTTP status a transport adapter should answer with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::NoSuchComponent { .. } | DispatchError::NoSuchAction { .. } => {
                StatusCode::NOT_FOUND
            }
            DispatchError::IllegalRequest { .. } => StatusCode::FORBIDDEN,
            DispatchError::MissingApplicationData { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DispatchError::InvalidResponseShape { .. }
            | DispatchError::ActionFailed { .. }
            | DispatchError::RenderFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NoSuchComponent { name } => {
                write!(f, "no such component '{name}'")
            }
            DispatchError::NoSuchAction {
                component,
                action,
                arity,
            } => write!(f, "component '{component}' has no action '{action}/{arity}'"),
            DispatchError::IllegalRequest { component } => write!(
                f,
                "illegal request: component '{component}' is private and cannot be requested directly"
            ),
            DispatchError::InvalidResponseShape {
                component,
                action,
                depth,
            } => write!(
                f,
                "invalid response shape: '{component}/{action}' returned a final response at nesting depth {depth}; \
                only the top-level call may do so"
            ),
            DispatchError::MissingApplicationData { app } => write!(
                f,
                "no application data for '{app}'. \
                Run the build step to publish a component registry for this application."
            ),
            DispatchError::ActionFailed {
                component,
                action,
                source,
            } => write!(f, "action '{component}/{action}' failed: {source}"),
            DispatchError::RenderFailed {
                component,
                action,
                source,
            } => write!(f, "view '{component}/{action}' failed to render: {source}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::ActionFailed { source, .. } | DispatchError::RenderFailed { source, .. } => {
                Some(&**source)
            }
            _ => None,
        }
    }
}
