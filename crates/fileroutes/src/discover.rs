// File: src/discover.rs
// Purpose: Full discovery pass: walk, load, resolve, attach metadata

use std::path::Path;

use crate::adapter::FrameworkAdapter;
use crate::config::{Config, RoutesConfig};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::error::Result;
use crate::inspect::{InspectedModule, ModuleLoader, ModuleRegistry, SourceLoader};
use crate::metadata::RouteMeta;
use crate::route::{RouteDescriptor, ResolvedRoute};
use crate::walker::DirectoryWalker;

/// Output of a discovery pass
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled<V> {
    /// Resolved routes in discovery order
    pub routes: Vec<ResolvedRoute<V>>,
    /// Every convention problem found along the way
    pub diagnostics: Vec<Diagnostic>,
}

impl<V> Default for Compiled<V> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<V> Compiled<V> {
    /// Surfaces every diagnostic as a `warn!` event
    pub fn log_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            tracing::warn!(code = %diagnostic.code, "{}", diagnostic);
        }
    }
}

/// Compiles route directories for one framework adapter
///
/// The module registry lives as long as the `Discovery`, so compiling the
/// same tree twice loads every file once.
///
/// # Examples
///
/// ```no_run
/// use fileroutes::{Discovery, FrameworkAdapter};
/// # fn run<A: FrameworkAdapter>(adapter: A) -> fileroutes::Result<()> {
/// let mut discovery = Discovery::new(adapter);
/// let compiled = discovery.compile_dir("routes")?;
/// compiled.log_diagnostics();
/// for resolved in &compiled.routes {
///     println!("/{}", resolved.route.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Discovery<A, L = SourceLoader> {
    adapter: A,
    config: RoutesConfig,
    registry: ModuleRegistry<L>,
}

impl<A: FrameworkAdapter> Discovery<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_loader(adapter, SourceLoader)
    }

    /// Uses the `[routes]` section of a loaded configuration
    pub fn with_config(adapter: A, config: &Config) -> Self {
        let mut discovery = Self::new(adapter);
        discovery.config = config.routes.clone();
        discovery
    }
}

impl<A: FrameworkAdapter, L: ModuleLoader> Discovery<A, L> {
    pub fn with_loader(adapter: A, loader: L) -> Self {
        Self {
            adapter,
            config: RoutesConfig::default(),
            registry: ModuleRegistry::with_loader(loader),
        }
    }

    pub fn routes_config(mut self, config: RoutesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn config(&self) -> &RoutesConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModuleRegistry<L> {
        &self.registry
    }

    /// Compiles the configured routes directory
    pub fn compile(&mut self) -> Result<Compiled<A::View>> {
        let root = self.config.directory.clone();
        self.compile_dir(root)
    }

    /// Compiles every route under `root`
    ///
    /// Routes whose view cannot be found are dropped with a
    /// `fileroutes.W004` diagnostic. I/O, parse and identity errors abort the
    /// whole pass.
    pub fn compile_dir(&mut self, root: impl AsRef<Path>) -> Result<Compiled<A::View>> {
        let root = root.as_ref();
        tracing::debug!(root = %root.display(), "compiling routes");

        let walker = DirectoryWalker::new(&self.adapter, &self.config);
        let mut walk = walker.walk(root);
        let mut compiled = Compiled::default();

        while let Some(route) = walk.next() {
            compiled.diagnostics.extend(walk.take_diagnostics());
            let route = route?;

            let module = self.registry.load(root, &route.source_path)?;
            let mut module = InspectedModule::new(module);

            match self.adapter.resolve_view(&route, &mut module) {
                Some(resolved) => {
                    let meta = RouteMeta::extract(&mut module, &resolved.export);
                    tracing::debug!(
                        route = %route.name,
                        module = %module.name(),
                        view = %resolved.export,
                        "resolved route"
                    );
                    compiled.routes.push(ResolvedRoute {
                        route,
                        view: resolved.view,
                        name: meta.name,
                        kwargs: meta.kwargs,
                    });
                }
                None => {
                    let diagnostic = view_not_found(&route, &module);
                    module.warning(diagnostic);
                }
            }

            compiled.diagnostics.extend(module.take_warnings());
        }
        compiled.diagnostics.extend(walk.take_diagnostics());

        tracing::debug!(
            routes = compiled.routes.len(),
            diagnostics = compiled.diagnostics.len(),
            "compiled routes"
        );
        Ok(compiled)
    }

    /// Walks `root` without loading any module
    pub fn descriptors(&self, root: impl AsRef<Path>) -> Result<(Vec<RouteDescriptor>, Vec<Diagnostic>)> {
        let walker = DirectoryWalker::new(&self.adapter, &self.config);
        let mut walk = walker.walk(root);
        let routes = walk.by_ref().collect::<Result<Vec<_>>>()?;
        Ok((routes, walk.take_diagnostics()))
    }
}

fn view_not_found(route: &RouteDescriptor, module: &InspectedModule) -> Diagnostic {
    let diagnostic = Diagnostic::new(
        DiagnosticCode::ViewNotFound,
        format!("no view found in {} for route `{}`", module.name(), route.name),
    );

    match module.attempted() {
        [] => diagnostic,
        attempted => diagnostic.with_hint(format!("define one of: {}", attempted.join(", "))),
    }
}
