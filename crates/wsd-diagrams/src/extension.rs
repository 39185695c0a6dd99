//! Registration of the `sequencediagram` directive with a site build.

use std::fs;
use std::rc::Rc;

use wsd_client::{DiagramOptions, DiagramRenderer};
use wsd_renderer::BuildEnv;
use wsd_site::{App, Extension};

use crate::consts::{DIRECTIVE_NAME, NODE_KIND};
use crate::directive::SequenceDiagramDirective;
use crate::naming::Naming;
use crate::node::render_diagram;

/// Site extension providing the `sequencediagram` directive.
///
/// # Example
///
/// ```ignore
/// use std::rc::Rc;
/// use wsd_client::WsdClient;
/// use wsd_diagrams::SequenceDiagramExtension;
/// use wsd_site::{SiteBuilder, SiteConfig};
///
/// let client = Rc::new(WsdClient::new("https://www.websequencediagrams.com/"));
/// let mut builder = SiteBuilder::new(SiteConfig::new("docs", "build/html"))
///     .with_extension(SequenceDiagramExtension::new(client));
/// builder.build()?;
/// ```
pub struct SequenceDiagramExtension {
    renderer: Rc<dyn DiagramRenderer>,
    defaults: DiagramOptions,
    naming: Naming,
}

impl SequenceDiagramExtension {
    #[must_use]
    pub fn new(renderer: Rc<dyn DiagramRenderer>) -> Self {
        Self {
            renderer,
            defaults: DiagramOptions::default(),
            naming: Naming::default(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: DiagramOptions) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }
}

impl Extension for SequenceDiagramExtension {
    fn name(&self) -> &str {
        DIRECTIVE_NAME
    }

    fn setup(&self, app: &mut App) {
        app.add_directive(
            SequenceDiagramDirective::new(Rc::clone(&self.renderer))
                .with_defaults(self.defaults.clone())
                .with_naming(self.naming),
        );
        app.add_node(NODE_KIND, render_diagram);
        app.connect_purge_doc(remove_stale_images);
    }
}

/// Delete images written for `docname` by the previous build.
fn remove_stale_images(env: &BuildEnv, docname: &str) {
    for path in env.artifacts(docname) {
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed stale diagram image"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove stale diagram image");
            }
        }
    }
}
