/// Path converters
///
/// A converter decides which request segments a placeholder accepts and
/// how the captured text is typed. All functions are pure.

use serde::Serialize;
use std::fmt;

/// Converters understood by [`PathAdapter`](crate::PathAdapter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Converter {
    /// One non-empty segment without `/`
    Str,
    /// ASCII digits, typed as `i64`
    Int,
    /// `[A-Za-z0-9_-]+`
    Slug,
    /// `8-4-4-4-12` hexadecimal groups
    Uuid,
    /// Non-empty remainder of the path, `/` included
    Path,
}

/// Converter tokens, in the order reported to users
pub const CONVERTERS: &[&str] = &["str", "int", "slug", "uuid", "path"];

/// Converter used for `[name]` placeholders
pub const DEFAULT_CONVERTER: Converter = Converter::Str;

impl Converter {
    /// Parses a converter token
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroutes_router::Converter;
    ///
    /// assert_eq!(Converter::from_token("int"), Some(Converter::Int));
    /// assert_eq!(Converter::from_token("integer"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "str" => Some(Converter::Str),
            "int" => Some(Converter::Int),
            "slug" => Some(Converter::Slug),
            "uuid" => Some(Converter::Uuid),
            "path" => Some(Converter::Path),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Converter::Str => "str",
            Converter::Int => "int",
            Converter::Slug => "slug",
            Converter::Uuid => "uuid",
            Converter::Path => "path",
        }
    }

    /// Whether this converter may consume more than one segment
    pub fn spans_segments(self) -> bool {
        matches!(self, Converter::Path)
    }

    /// Whether `value` is accepted by this converter
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroutes_router::Converter;
    ///
    /// assert!(Converter::Int.accepts("2022"));
    /// assert!(!Converter::Int.accepts("-1"));
    /// assert!(Converter::Path.accepts("docs/intro"));
    /// assert!(!Converter::Str.accepts("docs/intro"));
    /// ```
    pub fn accepts(self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }

        match self {
            Converter::Str => !value.contains('/'),
            Converter::Int => value.bytes().all(|b| b.is_ascii_digit()),
            Converter::Slug => value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
            Converter::Uuid => is_uuid(value),
            Converter::Path => true,
        }
    }

    /// Types an accepted value
    ///
    /// Returns `None` when the value is rejected, including integers that
    /// overflow `i64`.
    pub fn convert(self, value: &str) -> Option<ParamValue> {
        if !self.accepts(value) {
            return None;
        }

        match self {
            Converter::Int => value.parse().ok().map(ParamValue::Int),
            _ => Some(ParamValue::Text(value.to_string())),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_uuid(value: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let groups: Vec<&str> = value.split('-').collect();
    groups.len() == GROUPS.len()
        && groups
            .iter()
            .zip(GROUPS)
            .all(|(group, len)| group.len() == len && group.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// A typed parameter extracted from a request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Text(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            ParamValue::Int(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Text(text) => f.write_str(text),
        }
    }
}
