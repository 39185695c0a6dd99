//! Diagram placeholder record and its HTML rendering.

use std::fmt::Write;
use std::path::PathBuf;

use wsd_client::{DiagramOptions, Format};
use wsd_renderer::{Node, escape_html, render_extra_ids};

use crate::consts::NODE_KIND;

/// A successfully rendered diagram occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    /// Identifier, also the image file stem.
    pub id: String,
    /// Diagram text sent to the service.
    pub source_text: String,
    /// Options the diagram was rendered with.
    pub options: DiagramOptions,
    /// Absolute path of the written image.
    pub resolved_path: PathBuf,
    /// Image URI relative to the page.
    pub src: String,
    /// Alternative text (explicit `alt` or the identifier).
    pub alt: String,
}

impl DiagramNode {
    /// Convert into a document node of kind [`NODE_KIND`].
    ///
    /// The identifier is not attached as a node id: it travels on the
    /// preceding `target` node and is moved onto this node by the renderer.
    #[must_use]
    pub fn to_node(&self) -> Node {
        Node::new(NODE_KIND)
            .with_attr("src", &self.src)
            .with_attr("uri", &self.src)
            .with_attr("alt", &self.alt)
            .with_attr("format", self.options.format.as_str())
            .with_attr("style", self.options.style.as_str())
    }
}

/// Render a `sequencediagram` node.
///
/// PNG and SVG become `<img>`; PDF is embedded with `<object>` and a download
/// link as fallback content.
pub fn render_diagram(node: &Node, out: &mut String) {
    let src = escape_html(node.attr("src").unwrap_or_default());
    let alt = escape_html(node.attr("alt").unwrap_or_default());
    let id_attr = node
        .id()
        .map(|id| format!(r#" id="{}""#, escape_html(id)))
        .unwrap_or_default();

    render_extra_ids(node, out);
    match node.attr("format").and_then(Format::parse) {
        Some(Format::Pdf) => {
            write!(
                out,
                r#"<object{id_attr} class="{NODE_KIND}" data="{src}" type="application/pdf"><a href="{src}">{alt}</a></object>"#
            )
            .ok();
        }
        _ => {
            write!(
                out,
                r#"<img{id_attr} class="{NODE_KIND}" src="{src}" alt="{alt}">"#
            )
            .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn diagram(format: Format) -> DiagramNode {
        DiagramNode {
            id: "sequencediagram-index-0".to_owned(),
            source_text: "A->B: hi".to_owned(),
            options: DiagramOptions {
                format,
                ..DiagramOptions::default()
            },
            resolved_path: PathBuf::from("/out/_images/sequencediagram-index-0.png"),
            src: "_images/sequencediagram-index-0.png".to_owned(),
            alt: "A & B".to_owned(),
        }
    }

    #[test]
    fn test_to_node_attrs() {
        let node = diagram(Format::Png).to_node();

        assert_eq!(node.kind, "sequencediagram");
        assert!(node.ids.is_empty());
        assert_eq!(node.attr("src"), Some("_images/sequencediagram-index-0.png"));
        assert_eq!(node.attr("uri"), node.attr("src"));
        assert_eq!(node.attr("alt"), Some("A & B"));
        assert_eq!(node.attr("format"), Some("png"));
        assert_eq!(node.attr("style"), Some("default"));
    }

    #[test]
    fn test_render_png_as_img() {
        let node = diagram(Format::Png)
            .to_node()
            .with_id("sequencediagram-index-0");
        let mut out = String::new();

        render_diagram(&node, &mut out);

        assert_eq!(
            out,
            r#"<img id="sequencediagram-index-0" class="sequencediagram" src="_images/sequencediagram-index-0.png" alt="A &amp; B">"#
        );
    }

    #[test]
    fn test_render_pdf_as_object() {
        let mut data = diagram(Format::Pdf);
        data.src = "_images/x.pdf".to_owned();
        let mut out = String::new();

        render_diagram(&data.to_node(), &mut out);

        assert_eq!(
            out,
            r#"<object class="sequencediagram" data="_images/x.pdf" type="application/pdf"><a href="_images/x.pdf">A &amp; B</a></object>"#
        );
    }
}
