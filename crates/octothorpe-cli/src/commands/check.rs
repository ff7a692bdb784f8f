//! `octo check`: validate a route manifest.

use anyhow::Result;
use colored::Colorize;
use octothorpe_nav::HistoryKind;

use crate::manifest;

pub fn execute(manifest_path: &str) -> Result<()> {
    let loaded = manifest::load(manifest_path)?;

    let history = match loaded.config.routing.history {
        HistoryKind::Web => "web",
        HistoryKind::Hash => "hash",
    };
    let base = loaded.config.history_mode().base().to_string();

    println!(
        "{} {} is valid ({} routes, {} history{})",
        "✓".green().bold(),
        manifest_path,
        loaded.table.len(),
        history,
        if base.is_empty() {
            String::new()
        } else {
            format!(", base {}", base)
        },
    );

    Ok(())
}
