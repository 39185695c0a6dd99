//! Constants for the rendering service.

/// Base URL of the public websequencediagrams service.
pub const DEFAULT_API_URL: &str = "https://www.websequencediagrams.com/";

/// Value sent as `appVersion` unless overridden.
pub const DEFAULT_APP_VERSION: &str = "1";
