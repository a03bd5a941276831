/// `PathAdapter`: the reference [`FrameworkAdapter`]
///
/// Renders wildcards as `<converter:name>` placeholders and binds views to
/// their Rust item paths.

use fileroutes::{Class, FrameworkAdapter, Function, InspectedModule, RouteDescriptor, Wildcard};
use serde::Serialize;
use std::fmt;

use crate::converter::{CONVERTERS, DEFAULT_CONVERTER};

/// Name of the trait class views must implement
pub const VIEW_BASE: &str = "View";

/// Marker trait for struct and enum views
///
/// ```ignore
/// pub struct HomeView;
///
/// impl fileroutes_router::View for HomeView {}
/// ```
pub trait View {}

/// A view bound from a route module
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewHandle {
    /// A free function, e.g. `routes::blog::index::view`
    Function { module: String, name: String },
    /// A struct or enum implementing [`View`]
    Class { module: String, name: String },
}

impl ViewHandle {
    pub fn module(&self) -> &str {
        match self {
            ViewHandle::Function { module, .. } | ViewHandle::Class { module, .. } => module,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ViewHandle::Function { name, .. } | ViewHandle::Class { name, .. } => name,
        }
    }

    /// Full item path of the view
    pub fn path(&self) -> String {
        format!("{}::{}", self.module(), self.name())
    }

    pub fn is_class(&self) -> bool {
        matches!(self, ViewHandle::Class { .. })
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module(), self.name())
    }
}

/// Adapter producing [`ViewHandle`]s and `<converter:name>` placeholders
#[derive(Debug, Default, Clone, Copy)]
pub struct PathAdapter;

impl FrameworkAdapter for PathAdapter {
    type View = ViewHandle;

    fn converters(&self) -> &[&'static str] {
        CONVERTERS
    }

    fn default_converter(&self) -> &'static str {
        DEFAULT_CONVERTER.as_str()
    }

    fn expand_wildcard(&self, wildcard: &Wildcard<'_>) -> String {
        format!("<{}:{}>", wildcard.converter, wildcard.name)
    }

    fn view_base(&self) -> Option<&str> {
        Some(VIEW_BASE)
    }

    fn bind_function(&self, module: &InspectedModule, function: &Function) -> ViewHandle {
        ViewHandle::Function {
            module: module.name().to_string(),
            name: function.name.clone(),
        }
    }

    fn bind_class(&self, _route: &RouteDescriptor, module: &InspectedModule, class: &Class) -> ViewHandle {
        ViewHandle::Class {
            module: module.name().to_string(),
            name: class.name.clone(),
        }
    }
}
