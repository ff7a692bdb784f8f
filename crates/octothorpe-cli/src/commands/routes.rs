//! `octo routes`: list the table in registration order.

use anyhow::Result;
use colored::Colorize;
use octothorpe::RouteTarget;

use crate::manifest;

pub fn execute(manifest_path: &str) -> Result<()> {
    let loaded = manifest::load(manifest_path)?;

    for route in loaded.table.routes() {
        let (arrow, target) = match route.target() {
            RouteTarget::View(view) => ("→".dimmed(), view.as_str().normal()),
            RouteTarget::Redirect(to) => ("↪".yellow(), to.as_str().yellow()),
        };
        let props = if route.passes_props() {
            " [props]".dimmed().to_string()
        } else {
            String::new()
        };

        println!(
            "{:<16} {:<32} {} {}{}",
            route.name().cyan(),
            route.path(),
            arrow,
            target,
            props,
        );
    }

    Ok(())
}
