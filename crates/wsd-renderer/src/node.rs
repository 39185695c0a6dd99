//! Document nodes produced by directives and their HTML renderers.

use std::collections::{BTreeMap, HashMap};

use crate::html::{render_image, render_target};

/// Kind of an invisible anchor node.
pub const TARGET: &str = "target";

/// Kind of a plain image node (`src`, `alt` attributes).
pub const IMAGE: &str = "image";

/// Renders one node into the page output.
pub type RenderNodeFn = fn(&Node, &mut String);

/// A node in the rendered document.
///
/// Nodes are plain records: a kind, the identifiers it can be linked by, and
/// string attributes. How a kind is turned into HTML is decided by the
/// function registered for it in [`NodeRegistry`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub kind: String,
    pub ids: Vec<String>,
    pub attrs: BTreeMap<String, String>,
}

impl Node {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ids: Vec::new(),
            attrs: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Primary identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    #[must_use]
    pub fn is_target(&self) -> bool {
        self.kind == TARGET
    }
}

/// Move the identifiers of target nodes onto the node that follows them.
///
/// A target immediately followed by another node becomes redundant: the
/// following node takes over its ids and the target is dropped. A trailing
/// target (nothing after it) is kept as-is so its anchor still exists.
#[must_use]
pub fn propagate_targets(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::with_capacity(nodes.len());
    let mut targets: Vec<Node> = Vec::new();

    for mut node in nodes {
        if node.is_target() {
            targets.push(node);
            continue;
        }
        if !targets.is_empty() {
            let mut ids: Vec<String> = targets.drain(..).flat_map(|t| t.ids).collect();
            ids.append(&mut node.ids);
            node.ids = ids;
        }
        result.push(node);
    }

    result.extend(targets);
    result
}

/// Maps node kinds to the functions that render them.
#[derive(Clone)]
pub struct NodeRegistry {
    renderers: HashMap<String, RenderNodeFn>,
}

impl NodeRegistry {
    /// Create a registry with the built-in `target` and `image` renderers.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            renderers: HashMap::new(),
        };
        registry.register(TARGET, render_target);
        registry.register(IMAGE, render_image);
        registry
    }

    /// Register (or replace) the renderer for `kind`.
    pub fn register(&mut self, kind: impl Into<String>, render: RenderNodeFn) {
        self.renderers.insert(kind.into(), render);
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.renderers.contains_key(kind)
    }

    /// Render `nodes` in order into `out`.
    ///
    /// Returns a warning for each node whose kind has no renderer; such
    /// nodes produce no output.
    pub fn render(&self, nodes: &[Node], out: &mut String) -> Vec<String> {
        let mut warnings = Vec::new();
        for node in nodes {
            match self.renderers.get(&node.kind) {
                Some(render) => render(node, out),
                None => {
                    tracing::warn!(kind = %node.kind, "No renderer registered for node kind");
                    warnings.push(format!("no renderer registered for node kind '{}'", node.kind));
                }
            }
        }
        warnings
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("NodeRegistry").field("kinds", &kinds).finish()
    }
}
