//! `wsd build` command implementation.

use std::path::PathBuf;
use std::rc::Rc;

use clap::Args;
use wsd_client::{DiagramOptions, Format, Style, WsdClient, create_agent};
use wsd_config::{CliSettings, Config};
use wsd_diagrams::SequenceDiagramExtension;
use wsd_site::{SiteBuilder, SiteConfig};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// websequencediagrams service URL (overrides config).
    #[arg(long, env = "WSD_API_URL")]
    api_url: Option<String>,

    /// Default diagram style (overrides config).
    #[arg(long, value_parser = parse_style)]
    style: Option<Style>,

    /// Default image format: png, svg or pdf (overrides config).
    #[arg(long, value_parser = parse_format)]
    format: Option<Format>,

    /// Path to configuration file (default: auto-discover wsd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            api_url: self.api_url,
            style: self.style,
            format: self.format,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;
        let diagrams = &config.diagrams_resolved;

        output.info(&format!("Source: {}", docs.source_dir.display()));
        output.info(&format!("Output: {}", docs.output_dir.display()));
        output.info(&format!("Diagram service: {}", diagrams.api_url));

        let client = WsdClient::with_agent(&diagrams.api_url, create_agent(diagrams.timeout));
        let defaults = DiagramOptions {
            style: diagrams.style,
            format: diagrams.format,
            ..DiagramOptions::default()
        };
        let extension = SequenceDiagramExtension::new(Rc::new(client))
            .with_defaults(defaults)
            .with_naming(diagrams.naming);

        let mut builder =
            SiteBuilder::new(SiteConfig::new(&docs.source_dir, &docs.output_dir))
                .with_extension(extension);
        let report = builder.build()?;

        for warning in &report.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        output.success(&format!(
            "Built {} pages with {} diagrams ({} warnings) to {}",
            report.pages.len(),
            report.artifacts.len(),
            report.warnings.len(),
            docs.output_dir.display()
        ));
        Ok(())
    }
}

fn parse_style(value: &str) -> Result<Style, String> {
    Style::parse(value).ok_or_else(|| {
        let names: Vec<&str> = Style::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown style '{value}' (valid: {})", names.join(", "))
    })
}

fn parse_format(value: &str) -> Result<Format, String> {
    Format::parse(value).ok_or_else(|| format!("unknown format '{value}' (valid: png, svg, pdf)"))
}
