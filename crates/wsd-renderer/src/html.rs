//! HTML helpers and renderers for the built-in node kinds.

use std::fmt::Write;

use crate::node::Node;

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render a target node as one empty anchor span per identifier.
pub fn render_target(node: &Node, out: &mut String) {
    for id in &node.ids {
        write!(out, r#"<span id="{}"></span>"#, escape_html(id)).ok();
    }
}

/// Render an image node as `<img>`.
///
/// The first identifier becomes the element id; any further identifiers are
/// emitted as anchor spans before it.
pub fn render_image(node: &Node, out: &mut String) {
    render_extra_ids(node, out);
    out.push_str("<img");
    if let Some(id) = node.id() {
        write!(out, r#" id="{}""#, escape_html(id)).ok();
    }
    write!(
        out,
        r#" src="{}" alt="{}">"#,
        escape_html(node.attr("src").unwrap_or_default()),
        escape_html(node.attr("alt").unwrap_or_default())
    )
    .ok();
}

/// Emit anchor spans for every identifier after the first.
///
/// Renderers for custom node kinds use this so every id of a node stays
/// linkable while the element itself carries only the primary one.
pub fn render_extra_ids(node: &Node, out: &mut String) {
    for id in node.ids.iter().skip(1) {
        write!(out, r#"<span id="{}"></span>"#, escape_html(id)).ok();
    }
}
