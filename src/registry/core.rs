use crate::component::{ComponentBuilder, ComponentDescriptor};
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Immutable, point-in-time table of every component of one application.
///
/// A registry never changes after it is built. New generations are published
/// by swapping a whole registry through [`super::RegistryHandle`].
pub struct Registry {
    pub(super) generation: u64,
    components: HashMap<String, Arc<ComponentDescriptor>>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry without components.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            generation: 0,
            components: HashMap::new(),
        }
    }

    /// Exact, case-sensitive lookup by component name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<ComponentDescriptor>> {
        self.components.get(name).map(Arc::clone)
    }

    /// Publication generation; `0` until published through a handle.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registered component names, sorted.
    #[must_use]
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("generation", &self.generation)
            .field("components", &self.component_names())
            .finish()
    }
}

/// Collects component descriptions and validates them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    components: Vec<ComponentBuilder>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn component(mut self, component: ComponentBuilder) -> Self {
        self.components.push(component);
        self
    }

    /// Build every component and freeze the table.
    ///
    /// # Errors
    ///
    /// Fails when a component is invalid or two components share a name.
    pub fn build(self) -> Result<Registry> {
        let mut components = HashMap::with_capacity(self.components.len());
        for builder in self.components {
            let name = builder.name().to_string();
            let descriptor = builder
                .build()
                .with_context(|| format!("failed to build component '{name}'"))?;
            if components.contains_key(&name) {
                bail!("component '{name}' registered twice");
            }
            debug!(
                component = %name,
                actions = ?descriptor.controller().exports(),
                private = descriptor.is_private(),
                "Component registered"
            );
            components.insert(name, Arc::new(descriptor));
        }
        Ok(Registry {
            generation: 0,
            components,
        })
    }
}
