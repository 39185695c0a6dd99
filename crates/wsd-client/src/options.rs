//! Render options: diagram style, output format and pass-through parameters.

use std::collections::BTreeMap;

use crate::consts::DEFAULT_APP_VERSION;

/// Visual style understood by the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Default,
    Earth,
    ModernBlue,
    Mscgen,
    Omegapple,
    Qsd,
    Rose,
    RoundGreen,
    Napkin,
    Magazine,
    Vs2010,
    Patent,
}

impl Style {
    /// All styles, in the order the service documents them.
    pub const ALL: [Self; 12] = [
        Self::Default,
        Self::Earth,
        Self::ModernBlue,
        Self::Mscgen,
        Self::Omegapple,
        Self::Qsd,
        Self::Rose,
        Self::RoundGreen,
        Self::Napkin,
        Self::Magazine,
        Self::Vs2010,
        Self::Patent,
    ];

    /// Parse a style name (case-insensitive).
    ///
    /// Returns None if the name is not a known style.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|style| style.as_str() == name)
    }

    /// Name sent to the service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Earth => "earth",
            Self::ModernBlue => "modern-blue",
            Self::Mscgen => "mscgen",
            Self::Omegapple => "omegapple",
            Self::Qsd => "qsd",
            Self::Rose => "rose",
            Self::RoundGreen => "roundgreen",
            Self::Napkin => "napkin",
            Self::Magazine => "magazine",
            Self::Vs2010 => "vs2010",
            Self::Patent => "patent",
        }
    }
}

/// Output format for rendered diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Raster image (default).
    #[default]
    Png,
    /// Vector image.
    Svg,
    /// Document.
    Pdf,
}

impl Format {
    /// Parse format from attribute value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Return format as string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// File extension for artifacts in this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

/// Options for a single render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramOptions {
    pub style: Style,
    pub format: Format,
    /// Alternative text for the embedded image. Not sent to the service.
    pub alt: Option<String>,
    /// Value of the `appVersion` form field.
    pub app_version: String,
    /// Unrecognized parameters, forwarded to the service unchanged.
    pub extra: BTreeMap<String, String>,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            format: Format::default(),
            alt: None,
            app_version: DEFAULT_APP_VERSION.to_owned(),
            extra: BTreeMap::new(),
        }
    }
}

impl DiagramOptions {
    /// Build options from raw key/value pairs.
    ///
    /// Recognizes `style`, `format`, `alt` and `appVersion` (or `app_version`).
    /// Every other key is kept in [`extra`](Self::extra). Invalid `style` or
    /// `format` values are returned as warnings and the default is kept.
    pub fn from_pairs<'a, I>(pairs: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        let mut warnings = Vec::new();
        for (key, value) in pairs {
            if let Some(warning) = options.set(key, value) {
                warnings.push(warning);
            }
        }
        (options, warnings)
    }

    /// Apply a single option, returning a warning for invalid values.
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        match key {
            "style" => match Style::parse(value) {
                Some(style) => self.style = style,
                None => {
                    return Some(format!(
                        "unknown style '{value}', using '{}'",
                        self.style.as_str()
                    ));
                }
            },
            "format" => match Format::parse(value) {
                Some(format) => self.format = format,
                None => {
                    return Some(format!(
                        "unknown format '{value}', using '{}' (valid: png, svg, pdf)",
                        self.format.as_str()
                    ));
                }
            },
            "alt" => self.alt = Some(value.to_owned()),
            "appVersion" | "app_version" => value.clone_into(&mut self.app_version),
            _ => {
                self.extra.insert(key.to_owned(), value.to_owned());
            }
        }
        None
    }
}
