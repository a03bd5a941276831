//! Module inspection
//!
//! Typed, diagnostic-emitting lookups over a loaded route module. Lookups never
//! fail: a candidate of the wrong shape is reported as a [`Diagnostic`] and the
//! search moves on.

mod attribute;
mod loader;
mod registry;

pub use attribute::{
    Annotations, Attribute, Class, ClassKind, Constant, FromValue, Function, Reexport, Value,
};
pub use loader::{exports, ModuleLoader, SourceLoader, ROUTE_ANNOTATION};
pub use registry::{module_identity, LoadedModule, ModuleRegistry};

use std::sync::Arc;

use crate::diagnostics::{Diagnostic, DiagnosticCode};

/// A loaded module plus the diagnostics raised while searching it
#[derive(Debug, Clone)]
pub struct InspectedModule {
    module: Arc<LoadedModule>,
    warnings: Vec<Diagnostic>,
    attempted: Vec<String>,
}

impl InspectedModule {
    pub fn new(module: Arc<LoadedModule>) -> Self {
        Self {
            module,
            warnings: Vec::new(),
            attempted: Vec::new(),
        }
    }

    /// Module identity
    pub fn name(&self) -> &str {
        self.module.identity()
    }

    pub fn module(&self) -> &LoadedModule {
        &self.module
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.module.attribute(name)
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    /// Records a diagnostic against this module
    pub fn warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    /// Every name looked up by the `find_*_by_name` searches, first try first
    pub fn attempted(&self) -> &[String] {
        &self.attempted
    }

    fn attempt(&mut self, candidate: &str) {
        if !self.attempted.iter().any(|name| name == candidate) {
            self.attempted.push(candidate.to_string());
        }
    }

    /// First candidate that is a public function
    ///
    /// A candidate that exists under another shape records `fileroutes.W001`.
    pub fn find_function_by_name<S: AsRef<str>>(&mut self, candidates: &[S]) -> Option<Function> {
        for candidate in candidates.iter().map(AsRef::as_ref) {
            self.attempt(candidate);
            match self.module.attribute(candidate) {
                Some(Attribute::Function(function)) => return Some(function.clone()),
                Some(other) => {
                    let diagnostic = Diagnostic::new(
                        DiagnosticCode::NotAFunction,
                        format!("{} in {} is not a function", candidate, self.name()),
                    )
                    .with_hint(format!(
                        "{} cannot be a {}, change it to be a function",
                        candidate,
                        other.kind()
                    ));
                    self.warning(diagnostic);
                }
                None => {}
            }
        }
        None
    }

    /// First candidate that is a public struct or enum
    ///
    /// With a `base`, the candidate must implement it. A re-export of the base
    /// itself (`pub use some::path::View`) is skipped without a diagnostic.
    pub fn find_class_by_name<S: AsRef<str>>(
        &mut self,
        candidates: &[S],
        base: Option<&str>,
    ) -> Option<Class> {
        for candidate in candidates.iter().map(AsRef::as_ref) {
            self.attempt(candidate);
            let diagnostic = match self.module.attribute(candidate) {
                None => continue,
                Some(Attribute::Class(class)) => match base {
                    Some(base) if !class.implements(base) => Diagnostic::new(
                        DiagnosticCode::MissingViewBase,
                        format!("{} in {} does not implement {}", candidate, self.name(), base),
                    )
                    .with_hint(format!("add `impl {} for {}`", base, candidate)),
                    _ => return Some(class.clone()),
                },
                Some(Attribute::Reexport(reexport))
                    if base.is_some_and(|base| reexport.imports(base)) =>
                {
                    continue
                }
                Some(Attribute::Other { name, kind: "trait" }) if base == Some(name.as_str()) => {
                    continue
                }
                Some(other) => Diagnostic::new(
                    DiagnosticCode::NotAClass,
                    format!("{} in {} is not a class", candidate, self.name()),
                )
                .with_hint(format!(
                    "{} cannot be a {}, change it to be a struct or enum",
                    candidate,
                    other.kind()
                )),
            };
            self.warning(diagnostic);
        }
        None
    }

    /// Typed value of the constant `name`, if present
    ///
    /// `Some(None)` means the constant exists but has the wrong type, in
    /// which case `fileroutes.W006` has been recorded.
    pub fn find_attribute_by_type<T: FromValue>(&mut self, name: &str) -> Option<Option<T>> {
        let found = match self.module.attribute(name)? {
            Attribute::Constant(constant) => Err(constant.value.clone()),
            other => Ok(other.kind()),
        };

        let label = format!("{}::{}", self.name(), name);
        Some(match found {
            Err(value) => self.value_by_type(&label, &value),
            Ok(kind) => {
                self.warning(wrong_type::<T>(&label, kind));
                None
            }
        })
    }

    /// Typed value of the constant `name`, or `default`
    pub fn get_attribute_by_type<T: FromValue>(&mut self, name: &str, default: T) -> T {
        self.find_attribute_by_type(name)
            .flatten()
            .unwrap_or(default)
    }

    /// Converts an already extracted value, recording `fileroutes.W006` on mismatch
    pub fn value_by_type<T: FromValue>(&mut self, label: &str, value: &Value) -> Option<T> {
        let converted = T::from_value(value);
        if converted.is_none() {
            self.warning(wrong_type::<T>(label, value.kind()));
        }
        converted
    }
}

fn wrong_type<T: FromValue>(label: &str, kind: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::WrongAttributeType,
        format!("{} must be {}, not {}", label, T::EXPECTED, kind),
    )
}
