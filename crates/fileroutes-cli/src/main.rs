mod commands;
mod options;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::options::RoutesArgs;

#[derive(Parser)]
#[command(name = "fileroutes")]
#[command(version, about = "Compile a directory of route files into a route table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a routes directory and print the ordered route table
    Compile {
        #[command(flatten)]
        routes: RoutesArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show which route a request path resolves to
    Match {
        /// Request path, e.g. /blog/2022/01/test
        url: String,

        #[command(flatten)]
        routes: RoutesArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Text,
    /// JSON document
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { routes, format } => {
            commands::compile::execute(&routes, format)?;
        }
        Commands::Match { url, routes, format } => {
            commands::resolve::execute(&url, &routes, format)?;
        }
    }

    Ok(())
}
