//! `octo resolve`: resolve a path against the table.

use anyhow::Result;
use colored::Colorize;
use octothorpe::ResolvedTarget;

use crate::manifest;

pub fn execute(manifest_path: &str, path: &str, json: bool) -> Result<()> {
    let loaded = manifest::load(manifest_path)?;

    let matched = match loaded.table.resolve(path) {
        Ok(matched) => matched,
        Err(err) => {
            if json {
                println!("{}", serde_json::json!({ "error": err.to_string() }));
            } else {
                println!("{} {}", "✗".red().bold(), err);
            }
            std::process::exit(1);
        }
    };

    let mut params: Vec<(&str, &str)> = matched.params().iter().collect();
    params.sort();

    if json {
        let params: serde_json::Map<String, serde_json::Value> = params
            .iter()
            .map(|(name, value)| (name.to_string(), serde_json::Value::from(*value)))
            .collect();
        let out = serde_json::json!({
            "route": matched.route().name(),
            "pattern": matched.route().path(),
            "params": params,
            "props": matched.route().passes_props(),
            "redirect": matched.redirect_target(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match matched.target() {
        ResolvedTarget::View(view) => {
            println!(
                "{} {} {} {}",
                "✓".green().bold(),
                matched.route().name().cyan(),
                "→".dimmed(),
                view,
            );
            for (name, value) in params {
                println!("    {} = {}", name.dimmed(), value);
            }
        }
        ResolvedTarget::Redirect(target) => {
            println!(
                "{} {} {} {}",
                "↪".yellow().bold(),
                matched.route().name().cyan(),
                "redirects to".dimmed(),
                target,
            );
        }
    }

    Ok(())
}
