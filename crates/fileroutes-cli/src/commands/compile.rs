use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use fileroutes::{Compiled, Diagnostic, Value};
use fileroutes_router::ViewHandle;
use serde::Serialize;

use crate::options::RoutesArgs;
use crate::OutputFormat;

/// One row of the printed route table
#[derive(Debug, Serialize)]
pub struct RouteRow<'a> {
    pub route: String,
    pub view: &'a ViewHandle,
    pub name: Option<&'a str>,
    pub wildcard: bool,
    pub source: &'a Path,
    pub kwargs: &'a BTreeMap<String, Value>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    routes: Vec<RouteRow<'a>>,
    diagnostics: &'a [Diagnostic],
}

/// Rows in table order
pub fn rows(compiled: &Compiled<ViewHandle>) -> Vec<RouteRow<'_>> {
    compiled
        .routes
        .iter()
        .map(|resolved| RouteRow {
            route: format!("/{}", resolved.route.name),
            view: &resolved.view,
            name: resolved.name.as_deref(),
            wildcard: resolved.route.is_wildcard,
            source: &resolved.route.source_path,
            kwargs: &resolved.kwargs,
        })
        .collect()
}

pub fn execute(args: &RoutesArgs, format: OutputFormat) -> Result<()> {
    let compiled = args.compile()?;

    match format {
        OutputFormat::Json => {
            let report = Report {
                routes: rows(&compiled),
                diagnostics: &compiled.diagnostics,
            };
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize route table")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_table(&compiled),
    }

    Ok(())
}

fn print_table(compiled: &Compiled<ViewHandle>) {
    let rows = rows(compiled);
    let width = rows.iter().map(|row| row.route.len()).max().unwrap_or(0);

    for row in &rows {
        let route = format!("{:width$}", row.route, width = width);
        let route = if row.wildcard {
            route.yellow()
        } else {
            route.green()
        };
        match row.name {
            Some(name) => println!("{}  {}  {}", route, row.view, format!("({})", name).cyan()),
            None => println!("{}  {}", route, row.view),
        }
    }

    println!();
    println!(
        "{} routes, {} warnings",
        rows.len().to_string().bold(),
        compiled.diagnostics.len().to_string().bold()
    );
}
