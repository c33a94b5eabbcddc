mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_root_paths(&mut config.storage.roots);

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./surgistream.toml",
        "~/.config/surgistream/config.toml",
        "/etc/surgistream/config.toml",
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

fn expand_root_paths(roots: &mut [StorageRoot]) {
    for root in roots.iter_mut() {
        if let Some(raw) = root.path.to_str() {
            let expanded = shellexpand::tilde(raw);
            root.path = PathBuf::from(expanded.as_ref());
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.storage.roots.is_empty() {
        anyhow::bail!("At least one storage root must be configured");
    }

    let mut names = HashSet::new();
    let mut prefixes = HashSet::new();
    for root in &config.storage.roots {
        if root.name.trim().is_empty() {
            anyhow::bail!("Storage root {:?} has an empty name", root.path);
        }
        if !names.insert(root.name.as_str()) {
            anyhow::bail!("Duplicate storage root name '{}'", root.name);
        }
        if root.prefixes.iter().any(|p| p.is_empty()) {
            anyhow::bail!("Storage root '{}' has an empty prefix", root.name);
        }
        for prefix in &root.prefixes {
            if !prefixes.insert(prefix.as_str()) {
                anyhow::bail!(
                    "Prefix '{}' on storage root '{}' is already used by another root",
                    prefix,
                    root.name
                );
            }
        }
        if !root.path.is_dir() {
            tracing::warn!(
                "Storage root '{}' does not exist: {:?}",
                root.name,
                root.path
            );
        }
    }

    Ok(())
}
