use crate::context::RequestContext;
use crate::ewc::{ActionResult, Output, Redirect};
use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use super::scaffold::{default_actions, Resource};

/// Every action receives the request context as its leading argument, so an
/// action declared with `n` positional parameters has arity `n + CONTEXT_ARITY`.
pub const CONTEXT_ARITY: usize = 1;

/// Component and action names must be usable as a single path segment.
#[allow(clippy::expect_used)]
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("component name regex should be valid")
});

/// Arguments handed to a controller action.
///
/// The request context is an explicit leading field rather than a positional
/// convention; `params` holds only the positional parameters that follow it.
pub struct ActionArgs<'a> {
    /// Request context shared by the whole resolution
    pub ctx: &'a RequestContext,
    /// Name of the component owning the action
    pub component: &'a str,
    /// Name of the invoked action
    pub action: &'a str,
    /// Positional parameters after the context
    pub params: &'a [Value],
}

impl ActionArgs<'_> {
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&Value> {
        self.params.get(index)
    }

    /// Positional parameter as text; path parameters always arrive as strings.
    #[must_use]
    pub fn param_str(&self, index: usize) -> Option<&str> {
        self.params.get(index).and_then(Value::as_str)
    }

    /// Arity of the invoked action, context included.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len() + CONTEXT_ARITY
    }

    /// Local redirect to another action of the same component.
    #[must_use]
    pub fn redirect_to(&self, action: &str) -> Redirect {
        Redirect::local(self.component, action)
    }
}

/// Callable body of an action.
pub type ActionFn = dyn Fn(&ActionArgs<'_>) -> Result<ActionResult> + Send + Sync;

/// A named, arity-specific entry point on a controller.
pub struct Action {
    name: String,
    arity: usize,
    func: Box<ActionFn>,
}

/// Shared handle to an exported action.
pub type ActionHandle = Arc<Action>;

impl Action {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Run the action body.
    ///
    /// # Errors
    ///
    /// Returns whatever application error the action reports.
    pub fn call(&self, args: &ActionArgs<'_>) -> Result<ActionResult> {
        (self.func)(args)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// Whether a controller may be requested directly from a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    /// Reachable only through nested references from other components
    Private,
}

/// Arity table of one action name.
type ArityTable = HashMap<usize, ActionHandle>;

/// Exported action table of a component, keyed by name, then arity.
#[derive(Debug, Default)]
pub struct Controller {
    visibility: Visibility,
    actions: HashMap<String, ArityTable>,
}

impl Controller {
    /// Exact `(name, arity)` lookup; a different arity of the same name never matches.
    #[must_use]
    pub fn resolve_action(&self, name: &str, arity: usize) -> Option<ActionHandle> {
        self.actions.get(name)?.get(&arity).map(Arc::clone)
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Exported `(name, arity)` pairs in sorted order.
    #[must_use]
    pub fn exports(&self) -> Vec<(String, usize)> {
        let sorted: BTreeSet<(String, usize)> = self
            .actions
            .iter()
            .flat_map(|(name, arities)| arities.keys().map(move |arity| (name.clone(), *arity)))
            .collect();
        sorted.into_iter().collect()
    }
}

/// Arguments handed to a view hook.
pub struct RenderArgs<'a> {
    pub ctx: &'a RequestContext,
    pub component: &'a str,
    pub action: &'a str,
}

/// View hook: wraps a controller result, or an embedded component's resolved
/// output, into the component's rendered form.
pub type RenderFn = dyn Fn(&RenderArgs<'_>, Output) -> Result<Output> + Send + Sync;

/// Per-action render hooks of a component.
#[derive(Default)]
pub struct View {
    hooks: HashMap<String, Box<RenderFn>>,
}

impl View {
    /// The hook for `action`, or `None` when the view does not render it.
    #[must_use]
    pub fn hook(&self, action: &str) -> Option<&RenderFn> {
        self.hooks.get(action).map(Box::as_ref)
    }

    #[must_use]
    pub fn renders(&self, action: &str) -> bool {
        self.hooks.contains_key(action)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: BTreeSet<&String> = self.hooks.keys().collect();
        f.debug_struct("View").field("hooks", &names).finish()
    }
}

/// A named controller/view bundle, immutable once published in a registry.
#[derive(Debug)]
pub struct ComponentDescriptor {
    name: String,
    controller: Controller,
    view: View,
}

impl ComponentDescriptor {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ComponentBuilder {
        ComponentBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.controller.is_private()
    }

    #[must_use]
    pub fn resolve_action(&self, name: &str, arity: usize) -> Option<ActionHandle> {
        self.controller.resolve_action(name, arity)
    }
}

/// Registration-time description of a component.
///
/// Actions and view hooks are added explicitly; nothing is discovered by name
/// at runtime. A component can opt into the default `index`/`show`/`delete`
/// actions with [`ComponentBuilder::scaffold`]; explicitly registered actions
/// with the same name and arity take precedence.
pub struct ComponentBuilder {
    name: String,
    visibility: Visibility,
    actions: Vec<(String, usize, Box<ActionFn>)>,
    hooks: Vec<(String, Box<RenderFn>)>,
    scaffold: Option<Arc<dyn Resource>>,
}

impl ComponentBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            actions: Vec::new(),
            hooks: Vec::new(),
            scaffold: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mark the controller private: it can be embedded but not requested by path.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Export an action. `arity` counts the leading request context.
    #[must_use]
    pub fn action<F>(mut self, name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&ActionArgs<'_>) -> Result<ActionResult> + Send + Sync + 'static,
    {
        self.actions.push((name.into(), arity, Box::new(func)));
        self
    }

    /// Register the view hook for `action`.
    #[must_use]
    pub fn view<F>(mut self, action: impl Into<String>, render: F) -> Self
    where
        F: Fn(&RenderArgs<'_>, Output) -> Result<Output> + Send + Sync + 'static,
    {
        self.hooks.push((action.into(), Box::new(render)));
        self
    }

    /// Opt into the default resource actions backed by `resource`.
    #[must_use]
    pub fn scaffold<R: Resource>(mut self, resource: R) -> Self {
        self.scaffold = Some(Arc::new(resource));
        self
    }

    /// Validate names and arities and freeze the component.
    ///
    /// # Errors
    ///
    /// Fails on invalid component or action names, a zero arity, or a
    /// duplicate `(name, arity)` export.
    pub fn build(self) -> Result<ComponentDescriptor> {
        if !NAME_RE.is_match(&self.name) {
            bail!("invalid component name '{}'", self.name);
        }

        let mut actions: HashMap<String, ArityTable> = HashMap::new();
        for (name, arity, func) in self.actions {
            if !NAME_RE.is_match(&name) {
                bail!("component '{}': invalid action name '{name}'", self.name);
            }
            if arity < CONTEXT_ARITY {
                bail!(
                    "component '{}': action '{name}' must take at least the request context",
                    self.name
                );
            }
            let arities = actions.entry(name.clone()).or_default();
            if arities.contains_key(&arity) {
                bail!("component '{}': action '{name}/{arity}' exported twice", self.name);
            }
            arities.insert(arity, Arc::new(Action { name, arity, func }));
        }

        if let Some(resource) = self.scaffold {
            for (name, arity, func) in default_actions(resource) {
                actions
                    .entry(name.to_string())
                    .or_default()
                    .entry(arity)
                    .or_insert_with(|| {
                        Arc::new(Action {
                            name: name.to_string(),
                            arity,
                            func,
                        })
                    });
            }
        }

        let mut hooks = HashMap::new();
        for (action, render) in self.hooks {
            if hooks.insert(action.clone(), render).is_some() {
                bail!("component '{}': view hook '{action}' registered twice", self.name);
            }
        }

        Ok(ComponentDescriptor {
            name: self.name,
            controller: Controller {
                visibility: self.visibility,
                actions,
            },
            view: View { hooks },
        })
    }
}
