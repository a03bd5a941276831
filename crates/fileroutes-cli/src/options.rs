use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fileroutes::{Compiled, Config, Discovery, RoutesConfig};
use fileroutes_router::{PathAdapter, ViewHandle};
use tracing::debug;

/// Options shared by every command that compiles a routes directory
#[derive(Args, Debug, Clone, Default)]
pub struct RoutesArgs {
    /// Routes directory (defaults to `directory` from the config file)
    pub dir: Option<PathBuf>,

    /// Route file extension, without the dot (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Sort directory entries by name for reproducible output
    #[arg(long)]
    pub sorted: bool,

    /// Configuration file (defaults to ./fileroutes.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl RoutesArgs {
    /// Loads the configuration file and applies command-line overrides
    pub fn routes_config(&self) -> Result<RoutesConfig> {
        let config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::load_default().context("Failed to load fileroutes.toml")?,
        };

        let mut routes = config.routes;
        if let Some(dir) = &self.dir {
            routes = routes.with_directory(dir);
        }
        if !self.extensions.is_empty() {
            let extensions = self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string());
            routes = routes.with_extensions(extensions);
        }
        if self.sorted {
            routes = routes.with_sorted_entries(true);
        }
        Ok(routes)
    }

    /// Compiles the selected directory with the reference adapter
    pub fn compile(&self) -> Result<Compiled<ViewHandle>> {
        let config = self.routes_config()?;
        let directory = config.directory.clone();
        debug!(directory = %directory.display(), extensions = ?config.extensions, "Compiling routes");

        let compiled = Discovery::new(PathAdapter)
            .routes_config(config)
            .compile()
            .with_context(|| format!("Failed to compile routes in {}", directory.display()))?;

        compiled.log_diagnostics();
        debug!(routes = compiled.routes.len(), "Compiled routes");
        Ok(compiled)
    }
}
