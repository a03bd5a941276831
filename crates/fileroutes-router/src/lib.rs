//! # fileroutes-router
//!
//! Reference target for `fileroutes`: a [`PathAdapter`] that renders
//! wildcards as `<converter:name>` placeholders, and an ordered [`Router`]
//! built from the compiled table.
//!
//! - Literal segments (`/about`)
//! - Typed placeholders (`<int:year>`, `<slug:title>`, `<uuid:id>`)
//! - Multi-segment remainders (`<path:rest>`)
//! - Named routes and URL generation
//!
//! ## Matching Order
//!
//! Routes are tried in table order and the first match wins. Discovery
//! already puts literal routes ahead of wildcard routes within each
//! directory, so the table is never re-sorted.
//!
//! ## Example
//!
//! ```
//! use fileroutes_router::{ParamValue, Route, Router, ViewHandle};
//!
//! let view = ViewHandle::Function {
//!     module: "routes::blog".to_string(),
//!     name: "view".to_string(),
//! };
//!
//! let mut router = Router::new();
//! router.add_route(Route::new("blog/<int:year>/<slug>", view));
//!
//! let route_match = router.match_route("/blog/2022/hello").unwrap();
//! assert_eq!(route_match.params.get("year"), Some(&ParamValue::Int(2022)));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use fileroutes::{Compiled, ResolvedRoute, Value};

// ============================================================================
// Module Declarations
// ============================================================================

mod adapter;
mod converter;
pub mod path;
pub mod pattern;

pub use adapter::{PathAdapter, View, ViewHandle, VIEW_BASE};
pub use converter::{Converter, ParamValue, CONVERTERS, DEFAULT_CONVERTER};
pub use pattern::{classify_segment, parse_pattern, PatternSegment};

/// Parameters extracted from a matched path
pub type Params = HashMap<String, ParamValue>;

// ============================================================================
// Core Types
// ============================================================================

/// A single entry of the route table
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Compiled route name, e.g. `blog/<int:year>`
    pub pattern: String,
    /// Parsed segments of `pattern`
    pub segments: Vec<PatternSegment>,
    /// Whether `pattern` ends in `/`, as directory index routes do
    pub trailing_slash: bool,
    /// View bound to this route
    pub view: ViewHandle,
    /// Optional name for URL generation
    pub name: Option<String>,
    /// Keyword arguments from the route module
    pub kwargs: BTreeMap<String, Value>,
    /// File the route was compiled from
    pub source_path: Option<PathBuf>,
}

/// Result of matching a route against a path
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// The matched route
    pub route: Route,
    /// Typed parameters extracted from the path
    pub params: Params,
}

impl RouteMatch {
    /// Keyword arguments of the matched route
    pub fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.route.kwargs
    }

    pub fn view(&self) -> &ViewHandle {
        &self.route.view
    }
}

// ============================================================================
// Route Implementation
// ============================================================================

impl Route {
    /// Creates a route from a compiled pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroutes_router::{Route, ViewHandle};
    ///
    /// let view = ViewHandle::Function { module: "routes::docs::index".into(), name: "view".into() };
    /// let route = Route::new("docs/", view);
    /// assert!(route.matches("/docs/").is_some());
    /// assert!(route.matches("/docs").is_none());
    /// ```
    pub fn new(pattern: impl Into<String>, view: ViewHandle) -> Self {
        let pattern = pattern.into();
        Self {
            segments: parse_pattern(&pattern),
            trailing_slash: pattern.ends_with('/'),
            pattern,
            view,
            name: None,
            kwargs: BTreeMap::new(),
            source_path: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kwargs(mut self, kwargs: BTreeMap<String, Value>) -> Self {
        self.kwargs = kwargs;
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Whether any segment is a placeholder
    pub fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, PatternSegment::Param { .. }))
    }

    /// Matches this route against a request path
    ///
    /// Query strings and doubled slashes are ignored. A trailing slash is
    /// significant: `docs/` only matches `/docs/` and `docs` only `/docs`,
    /// which keeps a directory index apart from a sibling file of the same
    /// name. Every placeholder must accept its segment; `<path:...>`
    /// placeholders take the longest remainder that still lets the rest of
    /// the pattern match.
    pub fn matches(&self, request: &str) -> Option<Params> {
        if path::has_trailing_slash(request) != self.trailing_slash {
            return None;
        }
        let path_segments: Vec<&str> = path::segments(request).collect();

        // Tail-recursive helper function for functional matching
        fn match_segments(
            pattern: &[PatternSegment],
            path: &[&str],
            mut params: Params,
        ) -> Option<Params> {
            let Some((segment, rest)) = pattern.split_first() else {
                return path.is_empty().then_some(params);
            };

            match segment {
                PatternSegment::Static(text) => {
                    let (first, tail) = path.split_first()?;
                    if *first != text.as_str() {
                        return None;
                    }
                    match_segments(rest, tail, params)
                }
                PatternSegment::Param { name, converter } if converter.spans_segments() => {
                    (1..=path.len()).rev().find_map(|taken| {
                        let value = converter.convert(&path[..taken].join("/"))?;
                        let mut params = params.clone();
                        params.insert(name.clone(), value);
                        match_segments(rest, &path[taken..], params)
                    })
                }
                PatternSegment::Param { name, converter } => {
                    let (first, tail) = path.split_first()?;
                    params.insert(name.clone(), converter.convert(first)?);
                    match_segments(rest, tail, params)
                }
            }
        }

        match_segments(&self.segments, &path_segments, Params::new())
    }

    /// Generates a URL for this route by substituting parameters
    ///
    /// Returns `None` when a parameter is missing or rejected by its
    /// converter. Index routes keep their trailing slash.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroutes_router::{Route, ViewHandle};
    /// use std::collections::HashMap;
    ///
    /// let view = ViewHandle::Function { module: "routes::users".into(), name: "view".into() };
    /// let route = Route::new("users/<int:id>", view);
    ///
    /// let mut params = HashMap::new();
    /// params.insert("id".to_string(), "123".to_string());
    /// assert_eq!(route.generate_url(&params).as_deref(), Some("/users/123"));
    ///
    /// params.insert("id".to_string(), "abc".to_string());
    /// assert_eq!(route.generate_url(&params), None);
    /// ```
    pub fn generate_url(&self, params: &HashMap<String, String>) -> Option<String> {
        let segments: Option<Vec<&str>> = self
            .segments
            .iter()
            .map(|segment| match segment {
                PatternSegment::Static(text) => Some(text.as_str()),
                PatternSegment::Param { name, converter } => params
                    .get(name)
                    .map(String::as_str)
                    .filter(|value| converter.accepts(value)),
            })
            .collect();

        segments.map(|segments| {
            let mut url = format!("/{}", segments.join("/"));
            if !segments.is_empty() && self.trailing_slash {
                url.push('/');
            }
            url
        })
    }
}

impl From<ResolvedRoute<ViewHandle>> for Route {
    fn from(resolved: ResolvedRoute<ViewHandle>) -> Self {
        let route = Route::new(resolved.route.name, resolved.view)
            .with_kwargs(resolved.kwargs)
            .with_source_path(resolved.route.source_path);
        match resolved.name {
            Some(name) => route.with_name(name),
            None => route,
        }
    }
}

// ============================================================================
// Router Implementation
// ============================================================================

/// Ordered route table
///
/// The first route that matches a path wins.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route (builder pattern)
    pub fn with_route(mut self, route: Route) -> Self {
        self.add_route(route);
        self
    }

    /// Adds several routes, keeping their order (builder pattern)
    pub fn with_routes<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        routes.into_iter().for_each(|route| self.add_route(route));
        self
    }

    /// Appends a route to the end of the table
    pub fn add_route(&mut self, route: Route) {
        tracing::trace!(pattern = %route.pattern, view = %route.view, "added route");
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Matches a path against all routes and returns the first match
    ///
    /// # Examples
    ///
    /// ```
    /// use fileroutes_router::{Route, Router, ViewHandle};
    ///
    /// let view = |name: &str| ViewHandle::Function { module: format!("routes::{}", name), name: "view".into() };
    /// let router = Router::new()
    ///     .with_route(Route::new("normal", view("normal")))
    ///     .with_route(Route::new("<str:str>", view("[str]")));
    ///
    /// assert_eq!(router.match_route("/normal").unwrap().route.pattern, "normal");
    /// assert_eq!(router.match_route("/other").unwrap().route.pattern, "<str:str>");
    /// ```
    pub fn match_route(&self, path: &str) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            route.matches(path).map(|params| RouteMatch {
                route: route.clone(),
                params,
            })
        })
    }

    /// First route registered under `name`
    pub fn get_route_by_name(&self, name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.name.as_deref() == Some(name))
    }

    /// Reverses a named route into a URL
    ///
    /// Returns `None` for unknown names, missing parameters and parameters
    /// rejected by their converter.
    pub fn url_for(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        self.get_route_by_name(name)?.generate_url(params)
    }
}

impl From<Compiled<ViewHandle>> for Router {
    fn from(compiled: Compiled<ViewHandle>) -> Self {
        Router::new().with_routes(compiled.routes.into_iter().map(Route::from))
    }
}
