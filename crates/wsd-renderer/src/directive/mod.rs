//! Pluggable block directives.
//!
//! A block directive is a fenced code block whose info string starts with a
//! registered directive name:
//!
//! ````markdown
//! ```sequencediagram style=napkin alt="Login flow"
//! Alice->Bob: Authentication Request
//! ```
//! ````
//!
//! The first word names the directive, the rest of the info string holds
//! `key=value` options (optionally wrapped in `{...}`), and the block body is
//! the directive content.
//!
//! # Example
//!
//! ```
//! use wsd_renderer::Node;
//! use wsd_renderer::directive::{
//!     BlockDirective, DirectiveArgs, DirectiveContext, DirectiveOutput,
//! };
//!
//! struct NoteDirective;
//!
//! impl BlockDirective for NoteDirective {
//!     fn name(&self) -> &str { "note" }
//!
//!     fn run(&mut self, args: DirectiveArgs, ctx: &mut DirectiveContext<'_>) -> DirectiveOutput {
//!         if args.content.trim().is_empty() {
//!             ctx.warn("empty note");
//!             return DirectiveOutput::Skip;
//!         }
//!         DirectiveOutput::nodes(vec![Node::new("target").with_id("note-0")])
//!     }
//! }
//! ```

mod args;
mod context;
mod output;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use output::DirectiveOutput;

/// Handler for a block directive.
///
/// One handler instance serves every occurrence of its directive during a
/// build, so per-occurrence state belongs in [`DirectiveContext`], not in the
/// handler.
pub trait BlockDirective {
    /// Directive name matched against the first word of the fence info string.
    fn name(&self) -> &str;

    /// Process one occurrence.
    ///
    /// Returns:
    /// - [`DirectiveOutput::Nodes`] to replace the block with rendered nodes
    /// - [`DirectiveOutput::Skip`] to drop the block (nothing is rendered)
    /// - [`DirectiveOutput::PassThrough`] to render it as a normal code block
    fn run(&mut self, args: DirectiveArgs, ctx: &mut DirectiveContext<'_>) -> DirectiveOutput;
}
