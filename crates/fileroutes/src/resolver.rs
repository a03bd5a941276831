// File: src/resolver.rs
// Purpose: Name-priority view search shared by every adapter

use crate::adapter::{FrameworkAdapter, Resolved};
use crate::inspect::InspectedModule;
use crate::route::RouteDescriptor;

/// Fallback function view name
pub const VIEW_FUNCTION: &str = "view";

/// Fallback class view name
pub const VIEW_CLASS: &str = "View";

/// Ordered names tried when looking for a route's view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCandidates {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
}

impl ViewCandidates {
    /// Candidate names for a route
    ///
    /// For stem `home`: functions `home_view`, `home`, `view`; classes
    /// `HomeView`, `View`. Wildcard routes only get the fallbacks.
    pub fn for_route(route: &RouteDescriptor) -> Self {
        let base = route.default_view_name();

        let mut functions = Vec::new();
        let mut classes = Vec::new();
        if let Some(base) = &base {
            functions.push(format!("{}_view", base));
            functions.push(base.clone());
            classes.push(format!("{}View", pascal_case(base)));
        }
        functions.push(VIEW_FUNCTION.to_string());
        classes.push(VIEW_CLASS.to_string());

        Self {
            functions: dedup(functions),
            classes: dedup(classes),
        }
    }
}

fn dedup(names: Vec<String>) -> Vec<String> {
    names.into_iter().fold(Vec::new(), |mut unique, name| {
        if !unique.contains(&name) {
            unique.push(name);
        }
        unique
    })
}

/// Converts `snake_case` to `PascalCase`
///
/// Empty parts (from leading, trailing or doubled underscores) become `_`.
///
/// ```
/// use fileroutes::resolver::pascal_case;
///
/// assert_eq!(pascal_case("with_hyphen"), "WithHyphen");
/// assert_eq!(pascal_case("_private"), "_Private");
/// ```
pub fn pascal_case(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => "_".to_string(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Conventional view search
///
/// Functions are tried before classes. Diagnostics raised along the way are
/// recorded on `module`.
pub fn resolve_view<A: FrameworkAdapter + ?Sized>(
    adapter: &A,
    route: &RouteDescriptor,
    module: &mut InspectedModule,
) -> Option<Resolved<A::View>> {
    let candidates = ViewCandidates::for_route(route);

    if let Some(function) = module.find_function_by_name(&candidates.functions) {
        return Some(Resolved {
            view: adapter.bind_function(module, &function),
            export: function.name,
        });
    }

    let class = module.find_class_by_name(&candidates.classes, adapter.view_base())?;
    Some(Resolved {
        view: adapter.bind_class(route, module, &class),
        export: class.name,
    })
}
