//! Configuration parsing from octo.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::mode::HistoryMode;

/// Navigation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NavConfig {
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Routing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base path all app routes live under (e.g. "/app"). Supplied by the
    /// build or deployment; empty means the origin root.
    #[serde(default)]
    pub base_path: Option<String>,

    /// History strategy: browser-native paths or the URL fragment.
    #[serde(default)]
    pub history: HistoryKind,

    /// Whether literal segments match ignoring ASCII case (default: false)
    #[serde(default = "default_false")]
    pub case_insensitive: bool,

    /// Upper bound on redirect hops per navigation (default: 8)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// The configured history strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    #[default]
    Web,
    Hash,
}

// Default values
fn default_false() -> bool {
    false
}

fn default_max_redirects() -> usize {
    8
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            history: HistoryKind::Web,
            case_insensitive: false,
            max_redirects: default_max_redirects(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing or empty file yields the defaults, so an app without an
    /// octo.toml runs at the origin root in web mode.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: NavConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from the default path (./octo.toml).
    pub fn load_default() -> Result<Self> {
        Self::load("octo.toml")
    }

    /// The [`HistoryMode`] this configuration describes.
    pub fn history_mode(&self) -> HistoryMode {
        match self.routing.history {
            HistoryKind::Web => {
                HistoryMode::web(self.routing.base_path.as_deref().unwrap_or(""))
            }
            HistoryKind::Hash => HistoryMode::hash(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NavConfig::default();
        assert_eq!(config.routing.history, HistoryKind::Web);
        assert_eq!(config.routing.base_path, None);
        assert!(!config.routing.case_insensitive);
        assert_eq!(config.routing.max_redirects, 8);
        assert_eq!(config.history_mode(), HistoryMode::web(""));
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<NavConfig>("").unwrap_or_default();
        assert_eq!(config.routing.history, HistoryKind::Web);
    }

    #[test]
    fn test_custom_routing() {
        let toml = r#"
            [routing]
            base_path = "/app"
            history = "hash"
            case_insensitive = true
        "#;
        let config: NavConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.base_path.as_deref(), Some("/app"));
        assert_eq!(config.routing.history, HistoryKind::Hash);
        assert!(config.routing.case_insensitive);
        // Hash mode does not use the base path.
        assert_eq!(config.history_mode(), HistoryMode::hash());
    }

    #[test]
    fn test_web_mode_with_base() {
        let toml = r#"
            [routing]
            base_path = "/app/"
        "#;
        let config: NavConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.history_mode(), HistoryMode::web("/app"));
    }
}
