//! Extension registration surface.

use wsd_renderer::directive::BlockDirective;
use wsd_renderer::{BuildEnv, Registry, RenderNodeFn};

/// Callback fired before a document is rebuilt.
///
/// Receives the build environment (still holding the document's records from
/// the previous build) and the document name.
pub type PurgeDocHook = Box<dyn Fn(&BuildEnv, &str)>;

/// A plugin that registers directives, node renderers and hooks.
pub trait Extension {
    /// Extension name, used in logs.
    fn name(&self) -> &str;

    /// Register everything this extension provides.
    fn setup(&self, app: &mut App);
}

/// Registration surface handed to [`Extension::setup`].
#[derive(Default)]
pub struct App {
    registry: Registry,
    purge_hooks: Vec<PurgeDocHook>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block directive.
    pub fn add_directive<D: BlockDirective + 'static>(&mut self, directive: D) {
        self.registry.add_directive(directive);
    }

    /// Register the HTML renderer for a node kind.
    pub fn add_node(&mut self, kind: impl Into<String>, render: RenderNodeFn) {
        self.registry.add_node(kind, render);
    }

    /// Run `hook` before each document is rebuilt.
    pub fn connect_purge_doc(&mut self, hook: impl Fn(&BuildEnv, &str) + 'static) {
        self.purge_hooks.push(Box::new(hook));
    }

    #[must_use]
    pub fn has_directive(&self, name: &str) -> bool {
        self.registry.has_directive(name)
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Fire purge hooks for `docname`, then drop its records from `env`.
    ///
    /// Returns the artifact paths that had been recorded for the document.
    pub(crate) fn purge_doc(&self, env: &mut BuildEnv, docname: &str) -> Vec<std::path::PathBuf> {
        for hook in &self.purge_hooks {
            hook(env, docname);
        }
        env.purge_doc(docname)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("registry", &self.registry)
            .field("purge_hooks", &self.purge_hooks.len())
            .finish()
    }
}
