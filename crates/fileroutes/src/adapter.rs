//! The boundary between the discovery engine and a target framework.
//!
//! Everything the walker and the inspector produce is framework-neutral. An
//! adapter decides how wildcards are spelled, which converters exist, what
//! counts as a class view, and what a bound view handle looks like.

use crate::inspect::{Class, Function, InspectedModule};
use crate::resolver;
use crate::route::RouteDescriptor;
use crate::segment::Wildcard;

/// A view bound by an adapter, together with the module item it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<V> {
    pub view: V,
    /// Name of the module item the view was bound from
    pub export: String,
}

/// Framework-specific strategy for wildcard rendering and view detection
pub trait FrameworkAdapter {
    /// Handle an adapter produces for a matched view
    type View;

    /// Converter tokens this framework understands, e.g. `["str", "int"]`
    fn converters(&self) -> &[&'static str];

    /// Loosest converter, used when none is given or the given one is unknown
    fn default_converter(&self) -> &'static str;

    /// Separator between converter and name inside brackets
    fn converter_separator(&self) -> char {
        '_'
    }

    /// Renders a normalized wildcard in the framework's placeholder syntax
    fn expand_wildcard(&self, wildcard: &Wildcard<'_>) -> String;

    /// Trait a class view must implement to be accepted
    fn view_base(&self) -> Option<&str> {
        None
    }

    fn bind_function(&self, module: &InspectedModule, function: &Function) -> Self::View;

    fn bind_class(
        &self,
        route: &RouteDescriptor,
        module: &InspectedModule,
        class: &Class,
    ) -> Self::View;

    /// Locates the view for a route
    ///
    /// The default runs the conventional name-priority search.
    fn resolve_view(
        &self,
        route: &RouteDescriptor,
        module: &mut InspectedModule,
    ) -> Option<Resolved<Self::View>> {
        resolver::resolve_view(self, route, module)
    }
}
