mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./curator.toml",
        "./config.toml",
        "~/.config/curator/config.toml",
        "/etc/curator/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.catalog.url.trim().is_empty() {
        anyhow::bail!("Catalog URL cannot be empty");
    }

    if config.retry.max_attempts == 0 {
        anyhow::bail!("Retry max_attempts must be at least 1");
    }

    if config.scan.recent_days == 0 {
        anyhow::bail!("Scan recent_days must be at least 1");
    }

    for root in &config.scan.roots {
        if !root.exists() {
            tracing::warn!("Scan root does not exist: {:?}", root);
        }
    }

    Ok(())
}
