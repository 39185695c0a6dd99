//! Configuration management for wsd.
//!
//! Parses `wsd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `diagrams.api_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use wsd_client::{DEFAULT_API_URL, Format, Style};
use wsd_diagrams::Naming;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wsd.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override diagram service URL.
    pub api_url: Option<String>,
    /// Override default diagram style.
    pub style: Option<Style>,
    /// Override default image format.
    pub format: Option<Format>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    docs: DocsConfigRaw,
    diagrams: DiagramsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved diagrams configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for Markdown files.
    pub source_dir: PathBuf,
    /// Directory the HTML pages and `_images/` are written to.
    pub output_dir: PathBuf,
}

/// Raw diagrams configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    api_url: Option<String>,
    style: Option<String>,
    format: Option<String>,
    naming: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved diagram rendering configuration.
#[derive(Debug)]
pub struct DiagramsConfig {
    /// Base URL of the websequencediagrams service.
    pub api_url: String,
    /// Style used when a diagram does not set one.
    pub style: Style,
    /// Format used when a diagram does not set one.
    pub format: Format,
    /// Identifier scheme for generated images.
    pub naming: Naming,
    /// HTTP timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            style: Style::default(),
            format: Format::default(),
            naming: Naming::default(),
            timeout: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.api_url`").
        field: String,
        /// Error message (e.g., "${`WSD_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Parse an enumerated option, naming the valid values on failure.
fn parse_choice<T>(
    value: Option<&str>,
    field: &str,
    parse: impl Fn(&str) -> Option<T>,
    valid: &[&str],
    default: T,
) -> Result<T, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    parse(value).ok_or_else(|| {
        ConfigError::Validation(format!(
            "{field} '{value}' is not one of: {}",
            valid.join(", ")
        ))
    })
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wsd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(api_url) = &settings.api_url {
            self.diagrams_resolved.api_url.clone_from(api_url);
        }
        if let Some(style) = settings.style {
            self.diagrams_resolved.style = style;
        }
        if let Some(format) = settings.format {
            self.diagrams_resolved.format = format;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            diagrams: DiagramsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("build/html"),
            },
            diagrams_resolved: DiagramsConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let diagrams = &self.diagrams_resolved;
        require_non_empty(&diagrams.api_url, "diagrams.api_url")?;
        require_http_url(&diagrams.api_url, "diagrams.api_url")?;
        if diagrams.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::Validation(
                "diagrams.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.diagrams.api_url {
            self.diagrams.api_url = Some(expand::expand_env(url, "diagrams.api_url")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and parse
    /// enumerated diagram options.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "build/html"),
        };

        let raw = &self.diagrams;
        let style_names: Vec<&str> = Style::ALL.iter().map(|s| s.as_str()).collect();
        self.diagrams_resolved = DiagramsConfig {
            api_url: raw
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            style: parse_choice(
                raw.style.as_deref(),
                "diagrams.style",
                Style::parse,
                &style_names,
                Style::default(),
            )?,
            format: parse_choice(
                raw.format.as_deref(),
                "diagrams.format",
                Format::parse,
                &["png", "svg", "pdf"],
                Format::default(),
            )?,
            naming: parse_choice(
                raw.naming.as_deref(),
                "diagrams.naming",
                Naming::parse,
                &["serial", "random"],
                Naming::default(),
            )?,
            timeout: raw.timeout_secs.map(Duration::from_secs),
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/test/build/html")
        );
        assert_eq!(
            config.diagrams_resolved.api_url,
            "https://www.websequencediagrams.com/"
        );
        assert_eq!(config.diagrams_resolved.style, Style::Default);
        assert_eq!(config.diagrams_resolved.format, Format::Png);
        assert_eq!(config.diagrams_resolved.naming, Naming::Serial);
        assert!(config.diagrams_resolved.timeout.is_none());
    }

    #[test]
    fn test_resolve_full_config() {
        let toml = r#"
[docs]
source_dir = "documentation"
output_dir = "site"

[diagrams]
api_url = "http://localhost:8080/"
style = "napkin"
format = "svg"
naming = "random"
timeout_secs = 15
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/project/site"));
        let diagrams = &config.diagrams_resolved;
        assert_eq!(diagrams.api_url, "http://localhost:8080/");
        assert_eq!(diagrams.style, Style::Napkin);
        assert_eq!(diagrams.format, Format::Svg);
        assert_eq!(diagrams.naming, Naming::Random);
        assert_eq!(diagrams.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_resolve_empty_config_uses_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve(Path::new("/project")).unwrap();

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/docs"));
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/build/html")
        );
        assert_eq!(config.diagrams_resolved.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_unknown_style_rejected() {
        let mut config: Config = toml::from_str("[diagrams]\nstyle = \"sparkly\"\n").unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("diagrams.style 'sparkly'"));
        assert!(err.to_string().contains("napkin"));
    }

    #[test]
    fn test_unknown_naming_rejected() {
        let mut config: Config = toml::from_str("[diagrams]\nnaming = \"hash\"\n").unwrap();
        let err = config.resolve(Path::new("/project")).unwrap_err();
        assert!(err.to_string().contains("serial, random"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.diagrams_resolved.api_url = "ftp://example.com".to_owned();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("http:// or https://"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.diagrams_resolved.timeout = Some(Duration::ZERO);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            api_url: Some("http://localhost:9000".to_owned()),
            style: Some(Style::Rose),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.diagrams_resolved.api_url, "http://localhost:9000");
        assert_eq!(config.diagrams_resolved.style, Style::Rose);
        assert_eq!(config.diagrams_resolved.format, Format::Png);
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("wsd.toml");
        std::fs::write(&path, "[docs]\nsource_dir = \"pages\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, temp.path().join("pages"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/wsd.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_cli_url() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("wsd.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            api_url: Some("localhost".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
