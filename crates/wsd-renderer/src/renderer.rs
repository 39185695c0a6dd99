//! Markdown to HTML rendering with directive dispatch.

use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html,
};

use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput};
use crate::env::BuildEnv;
use crate::node::propagate_targets;
use crate::page::PageInfo;
use crate::registry::Registry;

/// Result of rendering one document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML body.
    pub html: String,
    /// Text of the first H1 heading, if any.
    pub title: Option<String>,
    /// Warnings produced while rendering, prefixed with `docname:line:`.
    pub warnings: Vec<String>,
}

/// A directive block being collected between its opening and closing fence.
struct PendingBlock<'a> {
    args: DirectiveArgs,
    line: usize,
    events: Vec<Event<'a>>,
}

/// Renders Markdown documents, handing registered fenced blocks to their
/// directives.
pub struct MarkdownRenderer<'r> {
    registry: &'r mut Registry,
}

impl<'r> MarkdownRenderer<'r> {
    /// Create a renderer with GFM enabled.
    #[must_use]
    pub fn new(registry: &'r mut Registry) -> Self {
        Self { registry }
    }

    /// GitHub Flavored Markdown: tables, strikethrough, task lists.
    fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }

    /// Render one document.
    pub fn render(&mut self, markdown: &str, page: &PageInfo, env: &mut BuildEnv) -> RenderResult {
        let lines = LineIndex::new(markdown);
        let mut events: Vec<Event<'_>> = Vec::new();
        let mut warnings = Vec::new();
        let mut pending: Option<PendingBlock<'_>> = None;
        let mut title: Option<String> = None;
        let mut in_title = false;

        for (event, range) in Parser::new_ext(markdown, Self::parser_options()).into_offset_iter() {
            if let Some(block) = pending.as_mut() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        block.events.push(event);
                        if let Some(block) = pending.take() {
                            self.dispatch(block, page, env, &mut events, &mut warnings);
                        }
                    }
                    Event::Text(ref text) => {
                        block.args.content.push_str(text);
                        block.events.push(event);
                    }
                    _ => block.events.push(event),
                }
                continue;
            }

            if let Some(args) = self.directive_args(&event) {
                pending = Some(PendingBlock {
                    args,
                    line: lines.line_of(range.start),
                    events: vec![event],
                });
                continue;
            }

            match &event {
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H1,
                    ..
                }) if title.is_none() => {
                    in_title = true;
                    title = Some(String::new());
                }
                Event::End(TagEnd::Heading(HeadingLevel::H1)) => in_title = false,
                Event::Text(text) | Event::Code(text) if in_title => {
                    if let Some(title) = title.as_mut() {
                        title.push_str(text);
                    }
                }
                _ => {}
            }
            events.push(event);
        }

        // Parser closes open fences at end of input; flush if it ever doesn't.
        if let Some(block) = pending.take() {
            self.dispatch(block, page, env, &mut events, &mut warnings);
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());

        RenderResult {
            html: output,
            title: title.filter(|t| !t.is_empty()),
            warnings,
        }
    }

    /// Arguments of a fenced block whose info string names a registered directive.
    fn directive_args(&self, event: &Event<'_>) -> Option<DirectiveArgs> {
        let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = event else {
            return None;
        };
        DirectiveArgs::parse_info(info, "").filter(|args| self.registry.has_directive(&args.name))
    }

    fn dispatch<'a>(
        &mut self,
        block: PendingBlock<'a>,
        page: &PageInfo,
        env: &mut BuildEnv,
        events: &mut Vec<Event<'a>>,
        warnings: &mut Vec<String>,
    ) {
        let PendingBlock {
            args,
            line,
            events: block_events,
        } = block;
        let name = args.name.clone();

        let output = match self.registry.directive_mut(&name) {
            Some(directive) => {
                let mut ctx = DirectiveContext::new(page, line, env, warnings);
                directive.run(args, &mut ctx)
            }
            None => DirectiveOutput::PassThrough,
        };

        match output {
            DirectiveOutput::Nodes(nodes) => {
                let nodes = propagate_targets(nodes);
                let mut html = String::new();
                for warning in self.registry.nodes().render(&nodes, &mut html) {
                    warnings.push(format!("{}:{line}: {warning}", page.docname));
                }
                html.push('\n');
                events.push(Event::Html(CowStr::from(html)));
            }
            DirectiveOutput::Skip => {
                tracing::debug!(directive = %name, docname = %page.docname, line, "Directive produced no output");
            }
            DirectiveOutput::PassThrough => events.extend(block_events),
        }
    }
}

/// Maps byte offsets to 1-indexed line numbers.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }
}
