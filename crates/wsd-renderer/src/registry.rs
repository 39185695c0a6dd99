//! Registered directives and node renderers.

use crate::directive::BlockDirective;
use crate::node::{NodeRegistry, RenderNodeFn};

/// Everything extensions have registered with the renderer.
#[derive(Default)]
pub struct Registry {
    directives: Vec<Box<dyn BlockDirective>>,
    nodes: NodeRegistry,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block directive.
    ///
    /// A later directive with the same name replaces the earlier one.
    pub fn add_directive<D: BlockDirective + 'static>(&mut self, directive: D) {
        let name = directive.name().to_owned();
        self.directives.retain(|d| d.name() != name);
        self.directives.push(Box::new(directive));
    }

    /// Register the HTML renderer for a node kind.
    pub fn add_node(&mut self, kind: impl Into<String>, render: RenderNodeFn) {
        self.nodes.register(kind, render);
    }

    #[must_use]
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|d| d.name() == name)
    }

    pub(crate) fn directive_mut(&mut self, name: &str) -> Option<&mut (dyn BlockDirective + 'static)> {
        self.directives
            .iter_mut()
            .find(|d| d.name() == name)
            .map(|d| d.as_mut())
    }

    #[must_use]
    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.directives.iter().map(|d| d.name()).collect();
        f.debug_struct("Registry")
            .field("directives", &names)
            .field("nodes", &self.nodes)
            .finish()
    }
}
