//! Identifier generation for diagram occurrences.

use crate::consts::SERIAL_CATEGORY;

/// How diagram identifiers (and image filenames) are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Naming {
    /// `sequencediagram-<doc>-<serial>`: stable across rebuilds.
    #[default]
    Serial,
    /// `sequencediagram-<uuid>`: new name on every build.
    Random,
}

impl Naming {
    /// Parse a naming scheme from its configuration name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "serial" => Some(Self::Serial),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Random => "random",
        }
    }

    /// Identifier for occurrence number `serial` of document `docname`.
    #[must_use]
    pub fn identifier(self, docname: &str, serial: usize) -> String {
        match self {
            Self::Serial => serial_identifier(docname, serial),
            Self::Random => format!("{SERIAL_CATEGORY}-{}", uuid::Uuid::new_v4().simple()),
        }
    }
}

/// `sequencediagram-<doc>-<serial>` with `/` in the docname replaced by `-`.
fn serial_identifier(docname: &str, serial: usize) -> String {
    format!("{SERIAL_CATEGORY}-{}-{serial}", docname.replace('/', "-"))
}
