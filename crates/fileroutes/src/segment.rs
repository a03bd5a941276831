/// Path segment transformation
///
/// Recognizes bracketed wildcard segments (`[slug]`, `[int_year]`) in
/// directory names and file stems and expands them into the adapter's
/// placeholder syntax. The transformer owns recognition and converter
/// normalization; rendering belongs to the [`FrameworkAdapter`].

use regex::Regex;

use crate::adapter::FrameworkAdapter;
use crate::diagnostics::{Diagnostic, DiagnosticCode};

/// A recognized wildcard with its converter already normalized
///
/// `converter` is always a token from the adapter's converter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wildcard<'a> {
    /// The raw segment, brackets included
    pub segment: &'a str,
    pub converter: &'a str,
    pub name: &'a str,
}

/// Result of transforming a segment or a directory route
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expanded {
    pub text: String,
    pub is_wildcard: bool,
}

impl Expanded {
    fn literal(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_wildcard: false,
        }
    }
}

/// Regex-driven wildcard recognizer for one converter separator
#[derive(Debug, Clone)]
pub struct SegmentTransformer {
    pattern: Regex,
}

impl SegmentTransformer {
    /// Builds a transformer for `[converter<separator>name]` segments
    pub fn new(separator: char) -> Self {
        let separator = regex::escape(&separator.to_string());
        let pattern = format!(
            r"^\[(?:(?P<converter>[^{sep}\]]+){sep})?(?P<name>[^\]]+)\]$",
            sep = separator
        );
        Self {
            pattern: Regex::new(&pattern).expect("wildcard pattern is a valid regex"),
        }
    }

    /// Builds the transformer matching an adapter's separator
    pub fn for_adapter<A: FrameworkAdapter + ?Sized>(adapter: &A) -> Self {
        Self::new(adapter.converter_separator())
    }

    /// Splits a bracketed segment into `(converter, name)`
    ///
    /// Returns `None` for literal segments. The converter is returned raw,
    /// before any normalization.
    pub fn parse<'s>(&self, segment: &'s str) -> Option<(Option<&'s str>, &'s str)> {
        let captures = self.pattern.captures(segment)?;
        let name = captures.name("name")?.as_str();
        let converter = captures.name("converter").map(|m| m.as_str());
        Some((converter, name))
    }

    /// Transforms a single segment (directory name or file stem)
    ///
    /// Unknown converters degrade to the adapter's default converter and
    /// record a diagnostic; a segment is never refused.
    pub fn transform<A: FrameworkAdapter + ?Sized>(
        &self,
        adapter: &A,
        segment: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Expanded {
        let Some((converter, name)) = self.parse(segment) else {
            return Expanded::literal(segment);
        };

        let known = adapter.converters();
        let converter = match converter {
            Some(converter) if known.contains(&converter) => converter,
            Some(converter) => {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::UnknownConverter,
                        format!(
                            "{} uses unknown converter `{}`, falling back to `{}`",
                            segment,
                            converter,
                            adapter.default_converter()
                        ),
                    )
                    .with_hint(format!("Known converters: {}.", known.join(", "))),
                );
                adapter.default_converter()
            }
            // [int] means "an int named int"
            None if known.contains(&name) => name,
            None => adapter.default_converter(),
        };

        let wildcard = Wildcard {
            segment,
            converter,
            name,
        };
        Expanded {
            text: adapter.expand_wildcard(&wildcard),
            is_wildcard: true,
        }
    }

    /// Transforms every segment of a `/`-separated directory route
    ///
    /// `foo/[slug]/bar` becomes `foo/<str:slug>/bar` for an adapter rendering `<converter:name>`.
    pub fn transform_directory<A: FrameworkAdapter + ?Sized>(
        &self,
        adapter: &A,
        directory_route: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Expanded {
        let directory_route = directory_route.strip_prefix('/').unwrap_or(directory_route);

        directory_route
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.transform(adapter, segment, diagnostics))
            .fold(Expanded::default(), |mut acc, part| {
                if !acc.text.is_empty() {
                    acc.text.push('/');
                }
                acc.text.push_str(&part.text);
                acc.is_wildcard |= part.is_wildcard;
                acc
            })
    }
}
