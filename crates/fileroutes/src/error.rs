// File: src/error.rs
// Purpose: Fatal errors that abort a discovery pass

use std::path::PathBuf;

/// Errors that stop a discovery pass.
///
/// Convention problems (a missing view, a misnamed file, a wrongly typed
/// constant) never surface here; they are recorded as
/// [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error(
        "module identity `{identity}` for {} is already registered by {}",
        .path.display(),
        .existing.display()
    )]
    IdentityCollision {
        identity: String,
        path: PathBuf,
        existing: PathBuf,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
