//! # fileroutes
//!
//! Compiles a directory of route files into an ordered, framework-agnostic
//! route table:
//! - Literal routes (`about.rs` → `about`)
//! - Directory indexes (`blog/index.rs` → `blog/`)
//! - Wildcards with converters (`[int_year]` → `<int:year>`)
//! - Views found by naming convention (`home_view`, `home`, `view`, `HomeView`, `View`)
//! - Route name and kwargs overrides (`ROUTE_NAME`, `ROUTE_KWARGS`, `#[route(...)]`)
//!
//! ## Pipeline
//!
//! 1. [`DirectoryWalker`] turns the tree into [`RouteDescriptor`]s, literal
//!    routes before wildcard routes within each directory.
//! 2. [`ModuleRegistry`](inspect::ModuleRegistry) parses each route file once
//!    into its public items. Nothing is executed.
//! 3. The [`FrameworkAdapter`] resolves and binds a view for every route.
//! 4. [`RouteMeta`] attaches name and kwargs overrides.
//!
//! Convention problems never abort a pass. They come back as
//! [`Diagnostic`]s next to the routes in [`Compiled`].
//!
//! ## Example
//!
//! ```no_run
//! use fileroutes::{Config, Discovery, FrameworkAdapter};
//!
//! fn routes<A: FrameworkAdapter>(adapter: A) -> fileroutes::Result<()> {
//!     let config = Config::load_default()?;
//!     let compiled = Discovery::with_config(adapter, &config).compile()?;
//!     compiled.log_diagnostics();
//!     Ok(())
//! }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod adapter;
pub mod config;
pub mod diagnostics;
pub mod discover;
mod error;
pub mod inspect;
pub mod metadata;
pub mod resolver;
pub mod route;
pub mod segment;
pub mod walker;

pub use adapter::{FrameworkAdapter, Resolved};
pub use config::{Config, RoutesConfig, CONFIG_FILE};
pub use diagnostics::{Diagnostic, DiagnosticCode};
pub use discover::{Compiled, Discovery};
pub use error::{Error, Result};
pub use inspect::{Class, Function, InspectedModule, Value};
pub use metadata::RouteMeta;
pub use route::{ResolvedRoute, RouteDescriptor};
pub use segment::{Expanded, SegmentTransformer, Wildcard};
pub use walker::DirectoryWalker;

// ============================================================================
// Test Support
// ============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use crate::adapter::FrameworkAdapter;
    use crate::inspect::{Class, Function, InspectedModule};
    use crate::route::RouteDescriptor;
    use crate::segment::Wildcard;

    /// Minimal adapter rendering `<converter:name>` and binding views to
    /// their `module::item` path
    pub struct AngleAdapter;

    impl FrameworkAdapter for AngleAdapter {
        type View = String;

        fn converters(&self) -> &[&'static str] {
            &["str", "int", "slug", "uuid", "path"]
        }

        fn default_converter(&self) -> &'static str {
            "str"
        }

        fn expand_wildcard(&self, wildcard: &Wildcard<'_>) -> String {
            format!("<{}:{}>", wildcard.converter, wildcard.name)
        }

        fn view_base(&self) -> Option<&str> {
            Some("View")
        }

        fn bind_function(&self, module: &InspectedModule, function: &Function) -> String {
            format!("{}::{}", module.name(), function.name)
        }

        fn bind_class(&self, _route: &RouteDescriptor, module: &InspectedModule, class: &Class) -> String {
            format!("{}::{}", module.name(), class.name)
        }
    }
}
