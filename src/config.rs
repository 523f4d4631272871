use std::path::Path;

use anyhow::Context;
use catalogue_core::RoutingSettings;
use serde::Deserialize;

/// Settings read from an optional TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Indent JSON responses
    pub pretty: bool,
    /// Routing settings for make-base documents that have none
    pub routing_settings: Option<RoutingSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            pretty: false,
            routing_settings: None,
        }
    }
}

impl AppConfig {
    /// Reads the config file, or returns defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config '{}'", path.display()))?;
        if let Some(settings) = &config.routing_settings {
            settings.validate()?;
        }
        Ok(config)
    }
}
