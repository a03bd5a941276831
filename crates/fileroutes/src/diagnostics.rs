//! Non-fatal warnings collected during discovery.
//!
//! Every convention violation found while compiling a route tree becomes a
//! [`Diagnostic`]. The affected route or attribute is dropped or defaulted and
//! discovery carries on; callers surface the list as startup warnings.

use std::fmt;

use serde::{Serialize, Serializer};

/// Stable identifiers for each kind of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// A candidate name exists but is not a function
    NotAFunction,
    /// A candidate name exists but is not a struct or enum
    NotAClass,
    /// A class view does not implement the adapter's view base
    MissingViewBase,
    /// No view convention matched; the route is dropped
    ViewNotFound,
    /// A file name contains characters that are not portable
    InvalidCharacters,
    /// An attribute exists but has the wrong type
    WrongAttributeType,
    /// A wildcard names a converter the adapter does not know
    UnknownConverter,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::NotAFunction => "fileroutes.W001",
            DiagnosticCode::NotAClass => "fileroutes.W002",
            DiagnosticCode::MissingViewBase => "fileroutes.W003",
            DiagnosticCode::ViewNotFound => "fileroutes.W004",
            DiagnosticCode::InvalidCharacters => "fileroutes.W005",
            DiagnosticCode::WrongAttributeType => "fileroutes.W006",
            DiagnosticCode::UnknownConverter => "fileroutes.W007",
        }
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured warning: message, stable code and an optional remediation hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub code: DiagnosticCode,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
