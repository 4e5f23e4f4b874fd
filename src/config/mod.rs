mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/kirkit/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("kirkit"))
}

/// Get the default config file path (~/.config/kirkit/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Where leaderboard state lives: `state_file` from the config, or
/// ~/.config/kirkit/state.json
pub fn get_state_path(config: &Config) -> Result<PathBuf> {
    match &config.state_file {
        Some(path) => Ok(path.clone()),
        None => Ok(get_config_dir()?.join("state.json")),
    }
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses ~/.config/kirkit/config.yaml
///
/// Relative paths inside the file are taken relative to the file's directory.
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Create ~/.config/kirkit/config.yaml",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path).with_context(|| {
        format!("Failed to read config file at {}", config_path.display())
    })?;

    let mut config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    let base = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    config.resolve_paths(base);

    Ok(config)
}
