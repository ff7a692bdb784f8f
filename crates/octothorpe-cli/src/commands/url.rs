//! `octo url`: generate the URL for a named route.

use anyhow::{anyhow, Result};
use colored::Colorize;

use crate::manifest;

pub fn execute(manifest_path: &str, name: &str, params: &[String]) -> Result<()> {
    let loaded = manifest::load(manifest_path)?;

    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(params.len());
    for raw in params {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("parameter `{}` is not a key=value pair", raw))?;
        pairs.push((key, value));
    }

    let app_path = loaded.table.url_for(name, pairs)?;
    let href = loaded.config.history_mode().href(&app_path);

    println!("{}", app_path);
    if href != app_path {
        println!("{} {}", "href:".dimmed(), href);
    }

    Ok(())
}
