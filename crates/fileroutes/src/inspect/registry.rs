// File: src/inspect/registry.rs
// Purpose: Identity-keyed cache of loaded route modules

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::attribute::Attribute;
use super::loader::{ModuleLoader, SourceLoader};
use crate::error::{Error, Result};

/// Snapshot of one route file's public attributes
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModule {
    identity: String,
    path: PathBuf,
    attributes: BTreeMap<String, Attribute>,
}

impl LoadedModule {
    pub fn new(identity: impl Into<String>, path: impl Into<PathBuf>, attributes: Vec<Attribute>) -> Self {
        Self {
            identity: identity.into(),
            path: path.into(),
            attributes: attributes
                .into_iter()
                .map(|attribute| (attribute.name().to_string(), attribute))
                .collect(),
        }
    }

    /// Module identity, e.g. `routes::blog::index`
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Canonical path of the source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }
}

/// Synthesizes a module identity from a source path
///
/// The extension is dropped and the remaining components are joined with
/// `::`. Root, prefix and `.` components are ignored.
///
/// ```
/// use fileroutes::inspect::module_identity;
///
/// assert_eq!(module_identity("routes/blog/index.rs"), "routes::blog::index");
/// ```
pub fn module_identity(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .with_extension("")
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("super".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("::")
}

/// `path` relative to `root`, under the name of `root` itself
///
/// `routes/blog/index.rs` under `routes` stays `routes/blog/index.rs`; a root
/// without a final component (`.`) is named after its canonical form.
fn scoped_path(root: &Path, path: &Path) -> PathBuf {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let scope = match root.file_name() {
        Some(name) => Some(PathBuf::from(name)),
        None => fs::canonicalize(root)
            .ok()
            .and_then(|canonical| canonical.file_name().map(PathBuf::from)),
    };

    match scope {
        Some(scope) if relative != path => scope.join(relative),
        _ => relative.to_path_buf(),
    }
}

/// Loads route modules once per identity
///
/// Entries are never evicted: a second pass over the same tree reuses the
/// first snapshot of every file.
#[derive(Debug, Default)]
pub struct ModuleRegistry<L = SourceLoader> {
    loader: L,
    modules: HashMap<String, Arc<LoadedModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: ModuleLoader> ModuleRegistry<L> {
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            modules: HashMap::new(),
        }
    }

    /// Loads `path` found under the walk root `root`, or returns the cached
    /// module for it
    ///
    /// The identity is the path relative to `root`, prefixed with the root
    /// directory's own name. Caching and collisions are decided on the
    /// canonical path: another file already registered under the same
    /// identity is an error.
    pub fn load(&mut self, root: &Path, path: &Path) -> Result<Arc<LoadedModule>> {
        let canonical = fs::canonicalize(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let identity = module_identity(scoped_path(root, path));

        if let Some(existing) = self.modules.get(&identity) {
            if existing.path() == canonical {
                tracing::trace!(identity = %identity, "module already loaded");
                return Ok(Arc::clone(existing));
            }
            return Err(Error::IdentityCollision {
                identity,
                path: canonical,
                existing: existing.path().to_path_buf(),
            });
        }

        let attributes = self.loader.load(&canonical)?;
        tracing::trace!(identity = %identity, attributes = attributes.len(), "loaded module");

        let module = Arc::new(LoadedModule::new(identity.clone(), canonical, attributes));
        self.modules.insert(identity, Arc::clone(&module));
        Ok(module)
    }

    pub fn get(&self, identity: &str) -> Option<&Arc<LoadedModule>> {
        self.modules.get(identity)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
