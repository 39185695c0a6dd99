//! The `sequencediagram` directive.
//!
//! Turns fenced blocks like
//!
//! ````markdown
//! ```sequencediagram style=napkin alt="Login flow"
//! Alice->Bob: Authentication Request
//! ```
//! ````
//!
//! into images rendered by the websequencediagrams service. Each successful
//! occurrence writes `<output>/_images/<identifier>.<ext>` and is replaced by
//! an anchor plus an `<img>` (or `<object>` for PDF) referencing it.
//!
//! # Architecture
//!
//! - [`SequenceDiagramDirective`]: per-occurrence processing (source
//!   resolution, naming, request, file write)
//! - [`SequenceDiagramExtension`]: registers the directive, the node renderer
//!   and the stale-image purge hook with a site build
//! - [`DiagramNode`]: record of a rendered occurrence
//! - [`Naming`]: serial or random identifiers
//!
//! Failures never abort the build: they are logged, reported as page
//! warnings, and the occurrence produces no output.

mod consts;
mod directive;
mod error;
mod extension;
mod naming;
mod node;

pub use consts::{DIRECTIVE_NAME, NODE_KIND};
pub use directive::SequenceDiagramDirective;
pub use error::DiagramError;
pub use extension::SequenceDiagramExtension;
pub use naming::Naming;
pub use node::{DiagramNode, render_diagram};
