// File: src/metadata.rs
// Purpose: Route name and keyword-argument overrides

use std::collections::BTreeMap;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::inspect::{Attribute, InspectedModule, Value};

/// Module constant overriding the route name
pub const ROUTE_NAME: &str = "ROUTE_NAME";

/// Module constant carrying keyword arguments for the target framework
pub const ROUTE_KWARGS: &str = "ROUTE_KWARGS";

/// Metadata attached to a resolved route
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMeta {
    pub name: Option<String>,
    pub kwargs: BTreeMap<String, Value>,
}

impl RouteMeta {
    /// Reads metadata for the view exported as `export`
    ///
    /// A `#[route(name = ..., kwargs = ...)]` annotation on the view wins over
    /// the module constants. Each piece is validated on its own, so a bad
    /// name never discards good kwargs. Unreadable annotation pieces on the
    /// view record `fileroutes.W006` and are ignored.
    pub fn extract(module: &mut InspectedModule, export: &str) -> Self {
        let annotations = match module.attribute(export) {
            Some(Attribute::Function(function)) => function.annotations.clone(),
            Some(Attribute::Class(class)) => class.annotations.clone(),
            _ => Default::default(),
        };

        let label = format!("{}::{}", module.name(), export);

        for text in &annotations.malformed {
            module.warning(
                Diagnostic::new(
                    DiagnosticCode::WrongAttributeType,
                    format!("{} route annotation is malformed: {}", label, text),
                )
                .with_hint("expected #[route(name = \"...\", kwargs = &[(\"key\", value)])]"),
            );
        }

        let name = match annotations.get("name") {
            Some(value) => module.value_by_type::<String>(&format!("{} route name", label), value),
            None => module.find_attribute_by_type::<String>(ROUTE_NAME).flatten(),
        };

        let kwargs: BTreeMap<String, Value> = match annotations.get("kwargs") {
            Some(value) => module.value_by_type(&format!("{} route kwargs", label), value),
            None => module.find_attribute_by_type(ROUTE_KWARGS).flatten(),
        }
        .unwrap_or_default();

        Self { name, kwargs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{exports, LoadedModule};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn module(source: &str) -> InspectedModule {
        let attributes = exports(&syn::parse_str(source).unwrap());
        InspectedModule::new(Arc::new(LoadedModule::new(
            "routes::home",
            "routes/home.rs",
            attributes,
        )))
    }

    #[test]
    fn test_no_metadata() {
        let mut module = module("pub fn view() {}");
        assert_eq!(RouteMeta::extract(&mut module, "view"), RouteMeta::default());
        assert!(module.warnings().is_empty());
    }

    #[test]
    fn test_module_constants() {
        let mut module = module(
            r#"
            pub const ROUTE_NAME: &str = "home";
            pub const ROUTE_KWARGS: &[(&str, &str)] = &[("template", "home.html")];
            pub fn view() {}
            "#,
        );
        let meta = RouteMeta::extract(&mut module, "view");
        assert_eq!(meta.name.as_deref(), Some("home"));
        assert_eq!(
            meta.kwargs.get("template"),
            Some(&Value::Text("home.html".to_string()))
        );
    }

    #[test]
    fn test_annotation_wins() {
        let mut module = module(
            r#"
            pub const ROUTE_NAME: &str = "module";
            #[route(name = "annotated")]
            pub fn view() {}
            "#,
        );
        let meta = RouteMeta::extract(&mut module, "view");
        assert_eq!(meta.name.as_deref(), Some("annotated"));
    }

    #[test]
    fn test_bad_name_keeps_kwargs() {
        let mut module = module(
            r#"
            pub const ROUTE_NAME: i32 = 3;
            pub const ROUTE_KWARGS: &[(&str, i32)] = &[("cache", 60)];
            pub fn view() {}
            "#,
        );
        let meta = RouteMeta::extract(&mut module, "view");
        assert_eq!(meta.name, None);
        assert_eq!(meta.kwargs.get("cache"), Some(&Value::Integer(60)));
        assert_eq!(module.warnings().len(), 1);
        assert_eq!(module.warnings()[0].code, DiagnosticCode::WrongAttributeType);
    }

    #[test]
    fn test_bad_annotation_kwargs() {
        let mut module = module(
            r#"
            #[route(kwargs = "template")]
            pub struct View;
            "#,
        );
        let meta = RouteMeta::extract(&mut module, "View");
        assert!(meta.kwargs.is_empty());
        assert_eq!(
            module.warnings()[0].message,
            "routes::home::View route kwargs must be mapping, not text"
        );
    }

    #[test]
    fn test_malformed_annotation_falls_back() {
        let mut module = module(
            r#"
            pub const ROUTE_NAME: &str = "home";
            #[route(name)]
            pub fn view() {}
            "#,
        );
        let meta = RouteMeta::extract(&mut module, "view");
        assert_eq!(meta.name.as_deref(), Some("home"));
        assert_eq!(module.warnings().len(), 1);
        assert_eq!(module.warnings()[0].code, DiagnosticCode::WrongAttributeType);
        assert!(module.warnings()[0]
            .message
            .starts_with("routes::home::view route annotation is malformed"));
    }

    #[test]
    fn test_malformed_annotation_on_other_item_is_ignored() {
        let mut module = module(
            r#"
            #[route(name)]
            pub fn helper() {}
            pub fn view() {}
            "#,
        );
        assert_eq!(RouteMeta::extract(&mut module, "view"), RouteMeta::default());
        assert!(module.warnings().is_empty());
    }
}
