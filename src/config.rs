use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Client settings. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Contract artifact handed to the provider when resolving the deployed instance.
    pub artifact_url: String,
    /// Node endpoint used when no wallet provider is injected into the page.
    pub fallback_rpc_url: String,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifact_url: "DoonTaggle.json".to_string(),
            fallback_rpc_url: "http://localhost:7546".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("[Config.from_json] invalid client config")?;
        config.level_filter()?;
        Ok(config)
    }

    /// The configured log level.
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level.parse::<log::LevelFilter>()
            .with_context(|| format!("[Config.level_filter] unknown log level '{}'", self.log_level))
    }
}
