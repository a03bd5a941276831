/// Pattern parsing for compiled route names
///
/// A compiled route name such as `blog/<int:year>/<slug>` is split into
/// typed segments once, when the route is added to the table.

use crate::converter::{Converter, DEFAULT_CONVERTER};

/// One segment of a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Literal text, matched exactly
    Static(String),
    /// `<converter:name>` placeholder
    Param { name: String, converter: Converter },
}

/// Classifies a single pattern segment (pure function)
///
/// `<name>` uses the default converter. A placeholder naming an unknown
/// converter is kept as literal text.
///
/// # Examples
///
/// ```
/// use fileroutes_router::pattern::{classify_segment, PatternSegment};
/// use fileroutes_router::Converter;
///
/// assert_eq!(classify_segment("about"), PatternSegment::Static("about".to_string()));
/// assert_eq!(
///     classify_segment("<int:year>"),
///     PatternSegment::Param { name: "year".to_string(), converter: Converter::Int }
/// );
/// ```
pub fn classify_segment(segment: &str) -> PatternSegment {
    let placeholder = segment
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .and_then(|inner| match inner.split_once(':') {
            Some((token, name)) => Converter::from_token(token).map(|c| (name, c)),
            None => Some((inner, DEFAULT_CONVERTER)),
        })
        .filter(|(name, _)| !name.is_empty());

    match placeholder {
        Some((name, converter)) => PatternSegment::Param {
            name: name.to_string(),
            converter,
        },
        None => PatternSegment::Static(segment.to_string()),
    }
}

/// Splits a route name into segments, ignoring empty ones
///
/// `docs/` and `docs` parse to the same segments, so [`Route`](crate::Route)
/// keeps the trailing slash separately. The root route `""` parses to none.
pub fn parse_pattern(pattern: &str) -> Vec<PatternSegment> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(classify_segment)
        .collect()
}
