//! Markdown renderer with pluggable block directives.
//!
//! This crate is the host side of a documentation build:
//! - [`MarkdownRenderer`] turns one Markdown document into HTML
//! - fenced code blocks whose info string names a registered
//!   [`BlockDirective`](directive::BlockDirective) are handed to that directive
//! - directives return [`Node`]s, which are rendered by functions registered
//!   per node kind in a [`NodeRegistry`]
//! - [`BuildEnv`] carries per-build bookkeeping (serial numbers, generated files)
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use wsd_renderer::directive::{
//!     BlockDirective, DirectiveArgs, DirectiveContext, DirectiveOutput,
//! };
//! use wsd_renderer::{BuildEnv, MarkdownRenderer, Node, PageInfo, Registry};
//!
//! struct Shout;
//!
//! impl BlockDirective for Shout {
//!     fn name(&self) -> &str { "shout" }
//!
//!     fn run(&mut self, args: DirectiveArgs, _ctx: &mut DirectiveContext<'_>) -> DirectiveOutput {
//!         DirectiveOutput::nodes(vec![
//!             Node::new("image")
//!                 .with_attr("src", "loud.png")
//!                 .with_attr("alt", args.content.trim().to_uppercase()),
//!         ])
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.add_directive(Shout);
//!
//! let page = PageInfo::new("index", Path::new("docs"), Path::new("build"));
//! let mut env = BuildEnv::new();
//! let result = MarkdownRenderer::new(&mut registry)
//!     .render("```shout\nhello\n```", &page, &mut env);
//! assert!(result.html.contains(r#"alt="HELLO""#));
//! ```

pub mod directive;
mod env;
mod html;
mod node;
mod page;
mod registry;
mod renderer;
mod util;

pub use env::BuildEnv;
pub use html::{escape_html, render_extra_ids, render_image, render_target};
pub use node::{IMAGE, Node, NodeRegistry, RenderNodeFn, TARGET, propagate_targets};
pub use page::{IMAGES_DIR, PageInfo};
pub use registry::Registry;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use util::relative_path;
