use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::inspect::Value;

/// Stem of a file that routes to its own directory
pub const INDEX_STEM: &str = "index";

/// A compiled, framework-neutral record of one URL path and its source file
///
/// `name` never contains bracket syntax: every dynamic segment has already
/// been expanded into the adapter's placeholder form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// URL path without a leading slash, e.g. `blog/<int:year>`
    pub name: String,
    /// File the route was discovered from
    pub source_path: PathBuf,
    /// Whether the directory prefix or the file segment was a wildcard
    pub is_wildcard: bool,
    /// File name without its extension
    pub stem: String,
    /// Whether this is the directory's own `index` route
    pub is_index: bool,
}

impl RouteDescriptor {
    /// Base name used to derive conventional view names
    ///
    /// Index routes use `index`; other literal routes use the stem with
    /// hyphens turned into underscores; wildcard routes have no base name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroutes::RouteDescriptor;
    ///
    /// let route = RouteDescriptor {
    ///     name: "with-hyphen".to_string(),
    ///     source_path: "routes/with-hyphen.rs".into(),
    ///     is_wildcard: false,
    ///     stem: "with-hyphen".to_string(),
    ///     is_index: false,
    /// };
    /// assert_eq!(route.default_view_name().as_deref(), Some("with_hyphen"));
    /// ```
    pub fn default_view_name(&self) -> Option<String> {
        if self.is_index || self.stem == INDEX_STEM {
            Some(INDEX_STEM.to_string())
        } else if !self.is_wildcard {
            Some(self.stem.replace('-', "_"))
        } else {
            None
        }
    }
}

/// A route paired with the view an adapter bound for it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute<V> {
    pub route: RouteDescriptor,
    pub view: V,
    /// Route name override from the view or module, if any
    pub name: Option<String>,
    /// Keyword arguments passed through to the target framework
    pub kwargs: BTreeMap<String, Value>,
}
