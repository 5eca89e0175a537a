use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.license-ledgr/config.toml`.
///
/// All tables are read once at startup and never mutated afterwards.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Registry resolver tuning.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Extra raw-name → SPDX mapping entries, consulted before the built-in
    /// normalization table. Keys are exact strings.
    #[serde(default)]
    pub licenses: HashMap<String, String>,
}

/// Tuning for the registry license resolver.
#[derive(Debug, Deserialize)]
pub struct ResolverConfig {
    /// Pause between registry lookups, in milliseconds. Keeps the QPS against
    /// the public registry polite; not a correctness knob.
    #[serde(default = "default_delay_ms", rename = "delay-ms")]
    pub delay_ms: u64,
    /// Package-id → license overrides, consulted before the built-in override
    /// table and before any network call.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_delay_ms() -> u64 {
    100
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            delay_ms: default_delay_ms(),
            overrides: HashMap::new(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<workspace>/.license-ledgr/config.toml`
/// 3. `~/.config/license-ledgr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(workspace: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = workspace.join(".license-ledgr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-ledgr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
