use crate::component::{ActionHandle, ComponentDescriptor};
use crate::response::FinalResponse;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use super::redirect::{Location, Redirect};

/// Maximum positional parameters stored inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Positional action parameters (the request context is passed separately).
pub type Params = SmallVec<[Value; MAX_INLINE_PARAMS]>;

/// Embeddable Web Component: anything that resolves into rendered output.
#[derive(Debug, Clone)]
pub enum Ewc {
    /// Unresolved reference by component name.
    ComponentRef {
        name: String,
        action: String,
        params: Vec<Value>,
    },
    /// Reference already resolved against a registry snapshot.
    ComponentCall(ComponentCall),
    /// Terminal payload, emitted without any view step.
    Data(Value),
    /// Members are resolved independently and kept in order.
    List(Vec<Ewc>),
    /// Not a component; the transport serves the path as a plain resource.
    Page(String),
    /// Terminal redirect instruction.
    Redirect(Redirect),
    /// Opaque value forwarded unchanged, e.g. custom headers.
    Raw(Value),
}

impl Ewc {
    /// Reference `name/action` with the given positional parameters.
    #[must_use]
    pub fn component<I, V>(name: impl Into<String>, action: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Ewc::ComponentRef {
            name: name.into(),
            action: action.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Ewc>) -> Self {
        Ewc::List(items.into_iter().collect())
    }
}

/// A component action bound to the descriptor it came from.
#[derive(Clone)]
pub struct ComponentCall {
    pub component: Arc<ComponentDescriptor>,
    pub action: ActionHandle,
    pub params: Params,
}

impl fmt::Debug for ComponentCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentCall")
            .field("component", &self.component.name())
            .field("action", &self.action)
            .field("params", &self.params)
            .finish()
    }
}

/// What a controller action hands back to the resolver.
#[derive(Debug, Clone)]
pub enum ActionResult {
    /// Payload for the component's view hook of this action.
    Data(Value),
    /// Redirect; no view is applied.
    Redirect(Redirect),
    /// Another embeddable value; resolved first, then wrapped by this
    /// component's view hook.
    Embed(Ewc),
    /// Finished response that bypasses the view. Only the top-level call may
    /// return one.
    Final(FinalResponse),
}

impl From<Ewc> for ActionResult {
    fn from(value: Ewc) -> Self {
        ActionResult::Embed(value)
    }
}

impl From<Redirect> for ActionResult {
    fn from(redirect: Redirect) -> Self {
        ActionResult::Redirect(redirect)
    }
}

/// Resolved form of an [`Ewc`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// Text produced by a view hook.
    Markup(String),
    /// Payload that reached no view hook, unchanged.
    Value(Value),
    /// Redirect target.
    Redirect(Location),
    /// Plain path passthrough.
    Page(String),
    /// Opaque passthrough.
    Raw(Value),
    /// Ordered results of a list.
    List(Vec<Output>),
    /// Finished response from a top-level action.
    Final(Box<FinalResponse>),
}

impl Output {
    #[must_use]
    pub fn markup(text: impl Into<String>) -> Self {
        Output::Markup(text.into())
    }

    /// Text content of a markup or string-valued leaf.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Markup(s) => Some(s),
            Output::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// `true` if this output or any list member below it is a finished response.
    #[must_use]
    pub fn contains_final(&self) -> bool {
        match self {
            Output::Final(_) => true,
            Output::List(items) => items.iter().any(Output::contains_final),
            _ => false,
        }
    }
}
