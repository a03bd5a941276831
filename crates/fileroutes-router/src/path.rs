//! Request path utilities
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

/// Strips the query string and fragment from a request target
///
/// ```
/// use fileroutes_router::path::strip_query;
///
/// assert_eq!(strip_query("/search?q=rust#top"), "/search");
/// assert_eq!(strip_query("/about"), "/about");
/// ```
pub fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Whether a request path ends in a slash after at least one segment
///
/// The root path `/` has no trailing slash.
///
/// ```
/// use fileroutes_router::path::has_trailing_slash;
///
/// assert!(has_trailing_slash("/docs/?page=2"));
/// assert!(!has_trailing_slash("/docs"));
/// assert!(!has_trailing_slash("/"));
/// ```
pub fn has_trailing_slash(path: &str) -> bool {
    let stripped = strip_query(path);
    stripped.ends_with(['/', '\\']) && segments(stripped).next().is_some()
}

/// Non-empty segments of a request path
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    strip_query(path)
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
}
