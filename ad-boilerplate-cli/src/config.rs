//! Configuration loading and parsing

use ad_boilerplate::GeneratorConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load generator configuration from a TOML file
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: GeneratorConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
