//! Directive output types.

use crate::node::Node;

/// Output from directive processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// Replace the block with these nodes.
    Nodes(Vec<Node>),
    /// Drop the block; nothing is rendered in its place.
    Skip,
    /// Render the block as an ordinary code block.
    PassThrough,
}

impl DirectiveOutput {
    /// Create a node output.
    ///
    /// An empty list behaves like [`Skip`](Self::Skip).
    #[must_use]
    pub fn nodes(nodes: Vec<Node>) -> Self {
        if nodes.is_empty() {
            Self::Skip
        } else {
            Self::Nodes(nodes)
        }
    }
}
