//! Constants for the sequencediagram directive.

/// Directive name matched against the fence info string.
pub const DIRECTIVE_NAME: &str = "sequencediagram";

/// Node kind of the rendered diagram placeholder.
pub const NODE_KIND: &str = "sequencediagram";

/// Serial-number category (and identifier prefix) for diagram occurrences.
pub(crate) const SERIAL_CATEGORY: &str = "sequencediagram";

/// Option naming a source file, relative to the source root.
pub(crate) const FILE_OPTION: &str = "file";
