use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use fileroutes_router::{ParamValue, RouteMatch, Router};
use serde::Serialize;

use crate::options::RoutesArgs;
use crate::OutputFormat;

#[derive(Debug, Serialize)]
struct MatchReport<'a> {
    route: String,
    view: String,
    name: Option<&'a str>,
    params: BTreeMap<&'a str, &'a ParamValue>,
}

impl<'a> From<&'a RouteMatch> for MatchReport<'a> {
    fn from(matched: &'a RouteMatch) -> Self {
        Self {
            route: format!("/{}", matched.route.pattern),
            view: matched.view().path(),
            name: matched.route.name.as_deref(),
            params: matched
                .params
                .iter()
                .map(|(name, value)| (name.as_str(), value))
                .collect(),
        }
    }
}

pub fn execute(url: &str, args: &RoutesArgs, format: OutputFormat) -> Result<()> {
    let router = Router::from(args.compile()?);

    let Some(matched) = router.match_route(url) else {
        bail!("No route matches {}", url);
    };
    let report = MatchReport::from(&matched);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize match")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{} {}", "Route:".bold(), report.route.green());
            println!("{} {}", "View:".bold(), report.view);
            if let Some(name) = report.name {
                println!("{} {}", "Name:".bold(), name.cyan());
            }
            for (name, value) in &report.params {
                println!("  {} = {}", name.yellow(), value);
            }
        }
    }

    Ok(())
}
