//! Shared utility functions.

/// Compute a relative URL from one page URL to another (RFC 3986).
///
/// Both `from` and `to` are URL paths without leading slash. Per RFC 3986 the
/// last segment of `from` is the current document; the base directory is
/// everything before it.
///
/// # Examples
///
/// ```
/// use wsd_renderer::relative_path;
///
/// assert_eq!(relative_path("index.html", "_images/a.png"), "_images/a.png");
/// assert_eq!(relative_path("guide/setup.html", "_images/a.png"), "../_images/a.png");
/// assert_eq!(relative_path("a/b", "a/c"), "c");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    // Trailing slash means the document is empty: all segments are the directory.
    let from_dir = if from.ends_with('/') || from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let remaining = &to_segs[common..];

    let result = format!("{}{}", "../".repeat(ups), remaining.join("/"));
    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}
