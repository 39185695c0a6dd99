//! Directive argument parsing.
//!
//! Parses fence info strings of the form `name key="value" key=value` (the
//! options may also be wrapped in braces: `name {key=value}`).

use std::collections::BTreeMap;

/// Parsed arguments of one directive occurrence.
///
/// # Example
///
/// ```
/// use wsd_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse_info(
///     r#"sequencediagram file=login.wsd alt="Login flow""#,
///     "",
/// ).unwrap();
/// assert_eq!(args.name, "sequencediagram");
/// assert_eq!(args.get("file"), Some("login.wsd"));
/// assert_eq!(args.get("alt"), Some("Login flow"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Directive name (first word of the info string).
    pub name: String,
    /// Block body (empty string if the block has no body).
    pub content: String,
    /// Key-value options, sorted by key.
    pub attrs: BTreeMap<String, String>,
}

impl DirectiveArgs {
    /// Parse a fence info string and attach the block body.
    ///
    /// Returns `None` for an empty info string.
    #[must_use]
    pub fn parse_info(info: &str, content: &str) -> Option<Self> {
        let info = info.trim();
        let (name, rest) = match info.find(|c: char| c.is_whitespace() || c == '{') {
            Some(i) => (&info[..i], &info[i..]),
            None => (info, ""),
        };
        if name.is_empty() {
            return None;
        }

        let rest = rest.trim();
        let attrs_str = rest
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .unwrap_or(rest);

        Some(Self {
            name: name.to_owned(),
            content: content.to_owned(),
            attrs: parse_attrs(attrs_str),
        })
    }

    /// Get an option value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Iterate over options except the given keys.
    pub fn attrs_except<'a>(
        &'a self,
        skip: &'a [&'a str],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.attrs
            .iter()
            .filter(move |(key, _)| !skip.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Parse `key="value" key='value' key=value` pairs.
///
/// Tokens without `=` are ignored.
fn parse_attrs(attrs_str: &str) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    let mut remaining = attrs_str.trim();

    while !remaining.is_empty() {
        remaining = remaining.trim_start();
        if let Some((key, value, rest)) = parse_key_value(remaining) {
            attrs.insert(key.to_owned(), value.to_owned());
            remaining = rest;
        } else {
            // Skip the unparseable token
            let end = remaining
                .find(char::is_whitespace)
                .unwrap_or(remaining.len());
            remaining = &remaining[end..];
        }
    }

    attrs
}

/// Parse a key-value pair from the start of `s`.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = &s[..eq_pos];

    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}
