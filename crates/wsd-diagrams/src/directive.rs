//! The `sequencediagram` block directive.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use wsd_client::{DiagramOptions, DiagramRenderer, ImageStream};
use wsd_renderer::directive::{BlockDirective, DirectiveArgs, DirectiveContext, DirectiveOutput};
use wsd_renderer::{IMAGES_DIR, Node, TARGET};

use crate::consts::{DIRECTIVE_NAME, FILE_OPTION, SERIAL_CATEGORY};
use crate::error::DiagramError;
use crate::naming::Naming;
use crate::node::DiagramNode;

/// Handler for ```` ```sequencediagram ```` blocks.
///
/// Each occurrence is rendered through the configured [`DiagramRenderer`],
/// written to `<output>/_images/<identifier>.<ext>`, and replaced by a
/// `target` node plus a diagram node. Any failure is logged and the
/// occurrence is dropped; the build continues.
pub struct SequenceDiagramDirective {
    renderer: Rc<dyn DiagramRenderer>,
    defaults: DiagramOptions,
    naming: Naming,
}

impl SequenceDiagramDirective {
    #[must_use]
    pub fn new(renderer: Rc<dyn DiagramRenderer>) -> Self {
        Self {
            renderer,
            defaults: DiagramOptions::default(),
            naming: Naming::default(),
        }
    }

    /// Options used when an occurrence does not set them.
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

    /// Render one occurrence and write its image.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError`] when the source cannot be resolved, the
    /// service round-trip fails, or the image cannot be written. No file is
    /// left behind on error, and only a failed write consumes a serial.
    pub fn process(
        &self,
        args: &DirectiveArgs,
        ctx: &mut DirectiveContext<'_>,
    ) -> Result<DiagramNode, DiagramError> {
        let options = self.merge_options(args, ctx);
        let source_text = resolve_source(args, ctx)?;
        let docname = ctx.docname().to_owned();
        tracing::debug!(docname = %docname, line = ctx.line, style = options.style.as_str(), format = options.format.as_str(), "Requesting diagram");
        let stream = self.renderer.render(&source_text, &options)?;

        let serial = ctx.env.new_serialno(&docname, SERIAL_CATEGORY);
        let id = ctx
            .env
            .claim_id(&docname, &self.naming.identifier(&docname, serial));
        let filename = format!("{id}.{}", options.format.extension());

        let image_dir = ctx.image_dir();
        fs::create_dir_all(&image_dir).map_err(|e| DiagramError::Write {
            path: image_dir.clone(),
            source: e,
        })?;
        let resolved_path = image_dir.join(&filename);

        let content_type = stream.content_type().unwrap_or("unknown").to_owned();
        let bytes = write_image(stream, &resolved_path).map_err(|e| DiagramError::Write {
            path: resolved_path.clone(),
            source: e,
        })?;
        tracing::debug!(id = %id, path = %resolved_path.display(), bytes, content_type = %content_type, "Diagram written");

        let src = ctx.relative_uri(&format!("{IMAGES_DIR}/{filename}"));
        let alt = options.alt.clone().unwrap_or_else(|| id.clone());

        Ok(DiagramNode {
            id,
            source_text,
            options,
            resolved_path,
            src,
            alt,
        })
    }

    /// Configured defaults overridden by the occurrence's options.
    ///
    /// Invalid style or format values are reported as page warnings and the
    /// default is kept.
    fn merge_options(&self, args: &DirectiveArgs, ctx: &mut DirectiveContext<'_>) -> DiagramOptions {
        let mut options = self.defaults.clone();
        for (key, value) in args.attrs_except(&[FILE_OPTION]) {
            if let Some(warning) = options.set(key, value) {
                tracing::warn!(docname = %ctx.docname(), line = ctx.line, "{warning}");
                ctx.warn(warning);
            }
        }
        options
    }
}

impl BlockDirective for SequenceDiagramDirective {
    fn name(&self) -> &str {
        DIRECTIVE_NAME
    }

    fn run(&mut self, args: DirectiveArgs, ctx: &mut DirectiveContext<'_>) -> DirectiveOutput {
        match self.process(&args, ctx) {
            Ok(diagram) => {
                let docname = ctx.docname().to_owned();
                ctx.env.record_artifact(&docname, &diagram.resolved_path);
                DirectiveOutput::nodes(vec![
                    Node::new(TARGET).with_id(&diagram.id),
                    diagram.to_node(),
                ])
            }
            Err(e) => {
                if e.is_warning() {
                    tracing::warn!(docname = %ctx.docname(), line = ctx.line, error = %e, "Skipping sequence diagram");
                } else {
                    tracing::error!(docname = %ctx.docname(), line = ctx.line, error = %e, "Skipping sequence diagram");
                }
                ctx.warn(e.to_string());
                DirectiveOutput::Skip
            }
        }
    }
}

/// Diagram text from the `file` option or, without it, the block body.
fn resolve_source(args: &DirectiveArgs, ctx: &DirectiveContext<'_>) -> Result<String, DiagramError> {
    let text = match args.get(FILE_OPTION) {
        Some(file) => read_source(&ctx.resolve_path(file))?,
        None => args.content.clone(),
    };
    if text.trim().is_empty() {
        return Err(DiagramError::EmptySource);
    }
    Ok(text)
}

fn read_source(path: &Path) -> Result<String, DiagramError> {
    if !path.is_file() {
        return Err(DiagramError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|e| DiagramError::ReadSource {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Stream the image into `path`, removing the partial file on failure.
fn write_image(stream: ImageStream, path: &Path) -> io::Result<u64> {
    let result = File::create(path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        let bytes = stream.copy_to(&mut writer)?;
        writer.flush()?;
        Ok(bytes)
    });
    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wsd_client::{ClientError, Format, RenderError, Style};
    use wsd_renderer::{BuildEnv, PageInfo};

    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake image";

    enum Reply {
        Image(&'static [u8]),
        Errors(Vec<String>),
        Broken,
    }

    /// Simulated service: records calls and answers with a fixed reply.
    struct FakeRenderer {
        reply: Reply,
        calls: RefCell<Vec<(String, DiagramOptions)>>,
    }

    impl FakeRenderer {
        fn new(reply: Reply) -> Rc<Self> {
            Rc::new(Self {
                reply,
                calls: RefCell::new(Vec::new()),
            })
        }
    }

    /// Yields a few bytes, then fails.
    struct BrokenReader(bool);

    impl io::Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0 {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.0 = true;
            buf[..4].copy_from_slice(b"\x89PNG");
            Ok(4)
        }
    }

    impl DiagramRenderer for FakeRenderer {
        fn render(&self, text: &str, options: &DiagramOptions) -> Result<ImageStream, ClientError> {
            self.calls
                .borrow_mut()
                .push((text.to_owned(), options.clone()));
            match &self.reply {
                Reply::Image(bytes) => Ok(ImageStream::from_bytes(bytes.to_vec())),
                Reply::Errors(messages) => Err(RenderError {
                    messages: messages.clone(),
                }
                .into()),
                Reply::Broken => Ok(ImageStream::from_reader(BrokenReader(false))),
            }
        }
    }

    struct Fixture {
        temp: TempDir,
        env: BuildEnv,
        warnings: Vec<String>,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            fs::create_dir_all(temp.path().join("docs")).unwrap();
            Self {
                temp,
                env: BuildEnv::new(),
                warnings: Vec::new(),
            }
        }

        fn out(&self) -> PathBuf {
            self.temp.path().join("out")
        }

        fn write_source(&self, rel: &str, content: &str) {
            let path = self.temp.path().join("docs").join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn run(
            &mut self,
            directive: &mut SequenceDiagramDirective,
            docname: &str,
            info: &str,
            body: &str,
        ) -> DirectiveOutput {
            let page = PageInfo::new(docname, &self.temp.path().join("docs"), &self.out());
            let args = DirectiveArgs::parse_info(info, body).unwrap();
            let mut ctx = DirectiveContext::new(&page, 1, &mut self.env, &mut self.warnings);
            directive.run(args, &mut ctx)
        }

        fn image_files(&self) -> Vec<String> {
            let Ok(entries) = fs::read_dir(self.out().join("_images")) else {
                return Vec::new();
            };
            let mut names: Vec<String> = entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names
        }
    }

    fn directive_for(renderer: &Rc<FakeRenderer>) -> SequenceDiagramDirective {
        SequenceDiagramDirective::new(Rc::<FakeRenderer>::clone(renderer))
    }

    fn nodes(output: DirectiveOutput) -> Vec<Node> {
        match output {
            DirectiveOutput::Nodes(nodes) => nodes,
            other => panic!("expected nodes, got {other:?}"),
        }
    }

    #[test]
    fn test_inline_diagram_writes_file_and_nodes() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = directive_for(&renderer);

        let nodes = nodes(fx.run(
            &mut directive,
            "index",
            "sequencediagram",
            "Alice->Bob: Authentication Request\n",
        ));

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], Node::new(TARGET).with_id("sequencediagram-index-0"));
        assert_eq!(nodes[1].kind, "sequencediagram");
        assert_eq!(
            nodes[1].attr("src"),
            Some("_images/sequencediagram-index-0.png")
        );
        assert_eq!(nodes[1].attr("alt"), Some("sequencediagram-index-0"));

        let image = fx.out().join("_images/sequencediagram-index-0.png");
        assert_eq!(fs::read(&image).unwrap(), PNG);
        assert_eq!(fx.env.artifacts("index"), &[image]);
        assert_eq!(
            renderer.calls.borrow()[0].0,
            "Alice->Bob: Authentication Request\n"
        );
    }

    #[test]
    fn test_options_override_defaults() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(b"<svg/>"));
        let defaults = DiagramOptions {
            style: Style::Napkin,
            ..DiagramOptions::default()
        };
        let mut directive =
            directive_for(&renderer).with_defaults(defaults);

        let nodes = nodes(fx.run(
            &mut directive,
            "index",
            r#"sequencediagram format=svg alt="Login flow" width=400"#,
            "A->B: hi",
        ));

        let calls = renderer.calls.borrow();
        let options = &calls[0].1;
        assert_eq!(options.style, Style::Napkin);
        assert_eq!(options.format, Format::Svg);
        assert_eq!(options.extra.get("width").map(String::as_str), Some("400"));
        assert_eq!(nodes[1].attr("alt"), Some("Login flow"));
        assert_eq!(fx.image_files(), vec!["sequencediagram-index-0.svg"]);
    }

    #[test]
    fn test_invalid_style_warns_and_keeps_default() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = directive_for(&renderer);

        nodes(fx.run(&mut directive, "index", "sequencediagram style=sparkly", "A->B: hi"));

        assert_eq!(renderer.calls.borrow()[0].1.style, Style::Default);
        assert_eq!(fx.warnings.len(), 1);
        assert!(fx.warnings[0].contains("unknown style 'sparkly'"));
    }

    #[test]
    fn test_file_source_is_read_relative_to_source_root() {
        let mut fx = Fixture::new();
        fx.write_source("flows/login.wsd", "Alice->Bob: from file\n");
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = directive_for(&renderer);

        let nodes = nodes(fx.run(
            &mut directive,
            "guide/setup",
            "sequencediagram file=flows/login.wsd",
            "ignored body",
        ));

        assert_eq!(renderer.calls.borrow()[0].0, "Alice->Bob: from file\n");
        assert_eq!(
            nodes[1].attr("src"),
            Some("../_images/sequencediagram-guide-setup-0.png")
        );
    }

    #[test]
    fn test_missing_file_produces_nothing() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = directive_for(&renderer);

        let output = fx.run(&mut directive, "index", "sequencediagram file=missing.wsd", "");

        assert_eq!(output, DirectiveOutput::Skip);
        assert!(renderer.calls.borrow().is_empty());
        assert!(fx.image_files().is_empty());
        assert!(fx.warnings[0].contains("diagram source file not found"));
    }

    #[test]
    fn test_empty_body_produces_nothing() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = directive_for(&renderer);

        let output = fx.run(&mut directive, "index", "sequencediagram", "  \n\t\n");

        assert_eq!(output, DirectiveOutput::Skip);
        assert!(renderer.calls.borrow().is_empty());
        assert_eq!(fx.warnings, vec!["index:1: diagram source is empty".to_owned()]);
    }

    #[test]
    fn test_service_errors_write_no_file() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Errors(vec!["Line 1: Syntax error".to_owned()]));
        let mut directive = SequenceDiagramDirective::new(renderer);

        let output = fx.run(&mut directive, "index", "sequencediagram", "A->: broken");

        assert_eq!(output, DirectiveOutput::Skip);
        assert!(fx.image_files().is_empty());
        assert!(fx.env.artifacts("index").is_empty());
        assert!(fx.warnings[0].contains("Line 1: Syntax error"));
    }

    #[test]
    fn test_stream_failure_removes_partial_file() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Broken);
        let mut directive = SequenceDiagramDirective::new(renderer);

        let output = fx.run(&mut directive, "index", "sequencediagram", "A->B: hi");

        assert_eq!(output, DirectiveOutput::Skip);
        assert!(fx.image_files().is_empty());
        assert!(fx.warnings[0].contains("failed to write diagram image"));
    }

    #[test]
    fn test_identical_occurrences_get_distinct_identifiers() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = SequenceDiagramDirective::new(renderer);

        let first = nodes(fx.run(&mut directive, "index", "sequencediagram", "A->B: same"));
        let second = nodes(fx.run(&mut directive, "index", "sequencediagram", "A->B: same"));

        assert_ne!(first[0].id(), second[0].id());
        assert_eq!(
            fx.image_files(),
            vec!["sequencediagram-index-0.png", "sequencediagram-index-1.png"]
        );
    }

    #[test]
    fn test_flattened_docnames_do_not_share_images() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = SequenceDiagramDirective::new(renderer);

        let flat = nodes(fx.run(&mut directive, "guide-setup", "sequencediagram", "A->B: flat"));
        let nested = nodes(fx.run(&mut directive, "guide/setup", "sequencediagram", "C->D: nested"));

        assert_eq!(flat[0].id(), Some("sequencediagram-guide-setup-0"));
        assert_eq!(nested[0].id(), Some("sequencediagram-guide-setup-0-2"));
        assert_eq!(
            fx.image_files(),
            vec![
                "sequencediagram-guide-setup-0-2.png",
                "sequencediagram-guide-setup-0.png"
            ]
        );
    }

    #[test]
    fn test_failed_render_does_not_consume_serial() {
        let mut fx = Fixture::new();
        let failing = FakeRenderer::new(Reply::Errors(vec!["Line 1: Syntax error".to_owned()]));
        let working = FakeRenderer::new(Reply::Image(PNG));

        let skipped = fx.run(&mut directive_for(&failing), "index", "sequencediagram", "A->: broken");
        let rendered = nodes(fx.run(&mut directive_for(&working), "index", "sequencediagram", "A->B: ok"));

        assert_eq!(skipped, DirectiveOutput::Skip);
        assert_eq!(rendered[0].id(), Some("sequencediagram-index-0"));
    }

    #[test]
    fn test_random_naming() {
        let mut fx = Fixture::new();
        let renderer = FakeRenderer::new(Reply::Image(PNG));
        let mut directive = SequenceDiagramDirective::new(renderer).with_naming(Naming::Random);

        let first = nodes(fx.run(&mut directive, "index", "sequencediagram", "A->B: one"));
        let second = nodes(fx.run(&mut directive, "index", "sequencediagram", "A->B: one"));

        assert_ne!(first[0].id(), second[0].id());
        assert_eq!(fx.image_files().len(), 2);
    }
}
