//! Route manifest parsing.
//!
//! The manifest is the declarative route table in a file: a `[routing]`
//! section (shared with the navigation runtime's config) plus `[[routes]]`
//! entries. View handles are plain labels here; the CLI inspects tables,
//! it does not mount anything.

use std::fs;

use anyhow::{bail, Context, Result};
use octothorpe::{Route, RouteTable};
use octothorpe_nav::NavConfig;
use serde::Deserialize;

/// The `[[routes]]` part of a manifest file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One `[[routes]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    pub name: String,
    pub path: String,

    /// View label the route mounts (exclusive with `redirect`).
    #[serde(default)]
    pub view: Option<String>,

    /// Redirect target (exclusive with `view`).
    #[serde(default)]
    pub redirect: Option<String>,

    /// Forward captured parameters to the view as direct inputs.
    #[serde(default)]
    pub props: bool,
}

/// A manifest lowered into a built table plus its navigation config.
pub struct LoadedTable {
    pub table: RouteTable<String>,
    pub config: NavConfig,
}

/// Reads, parses, and builds a manifest file.
pub fn load(path: &str) -> Result<LoadedTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read route manifest: {}", path))?;

    let manifest: Manifest = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse route manifest: {}", path))?;
    let config: NavConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse [routing] section: {}", path))?;

    tracing::debug!(path, routes = manifest.routes.len(), "manifest parsed");

    let table = build_table(&manifest, &config)
        .with_context(|| format!("Invalid route table in {}", path))?;

    Ok(LoadedTable { table, config })
}

fn build_table(manifest: &Manifest, config: &NavConfig) -> Result<RouteTable<String>> {
    let mut builder =
        RouteTable::builder().case_insensitive(config.routing.case_insensitive);

    for entry in &manifest.routes {
        let route = match (&entry.view, &entry.redirect) {
            (Some(view), None) => Route::new(entry.name.as_str(), entry.path.as_str(), view.clone()),
            (None, Some(target)) => {
                Route::redirect(entry.name.as_str(), entry.path.as_str(), target.as_str())
            }
            (Some(_), Some(_)) => {
                bail!("route `{}` declares both a view and a redirect", entry.name)
            }
            (None, None) => {
                bail!("route `{}` declares neither a view nor a redirect", entry.name)
            }
        };

        builder = builder.route(if entry.props { route.with_props() } else { route });
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [routing]
        history = "web"

        [[routes]]
        name = "home"
        path = "/"
        view = "CharacterListView"

        [[routes]]
        name = "chat"
        path = "/chat/:character_id"
        view = "ChatView"
        props = true
    "#;

    #[test]
    fn test_sample_manifest_builds() {
        let manifest: Manifest = toml::from_str(SAMPLE).unwrap();
        let config: NavConfig = toml::from_str(SAMPLE).unwrap();
        let table = build_table(&manifest, &config).unwrap();

        assert_eq!(table.len(), 2);
        let m = table.resolve("/chat/42").unwrap();
        assert_eq!(m.view(), Some(&"ChatView".to_string()));
        assert_eq!(m.params().get("character_id"), Some("42"));
    }

    #[test]
    fn test_entry_needs_view_or_redirect() {
        let manifest: Manifest = toml::from_str(
            r#"
            [[routes]]
            name = "dangling"
            path = "/nowhere"
            "#,
        )
        .unwrap();

        let err = build_table(&manifest, &NavConfig::default()).unwrap_err();
        assert!(err.to_string().contains("dangling"));
    }

    #[test]
    fn test_entry_cannot_be_both() {
        let manifest: Manifest = toml::from_str(
            r#"
            [[routes]]
            name = "confused"
            path = "/x"
            view = "View"
            redirect = "/y"
            "#,
        )
        .unwrap();

        assert!(build_table(&manifest, &NavConfig::default()).is_err());
    }
}
