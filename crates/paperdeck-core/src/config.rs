use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperdeckConfig {
    /// Fixed CSV path used when no path is given on the command line.
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Base URL used to resolve relative PDF paths.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_data_path() -> String {
    "data/papers.csv".to_string()
}

fn default_base_url() -> String {
    "https://openaccess.thecvf.com/".to_string()
}

impl Default for PaperdeckConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            base_url: default_base_url(),
        }
    }
}

impl PaperdeckConfig {
    /// Load config from ~/.config/paperdeck/config.toml, creating defaults if missing.
    pub fn load() -> crate::error::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                crate::error::PaperdeckError::Config(format!("Failed to read config: {e}"))
            })?;
            let config: PaperdeckConfig = toml::from_str(&contents).map_err(|e| {
                crate::error::PaperdeckError::Config(format!("Failed to parse config: {e}"))
            })?;
            Ok(config)
        } else {
            let config = PaperdeckConfig::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> crate::error::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::PaperdeckError::Config(format!("Failed to serialize config: {e}"))
        })?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> crate::error::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::PaperdeckError::Config("Could not determine config directory".into())
        })?;
        Ok(config_dir.join("paperdeck").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PaperdeckConfig::default();
        assert_eq!(config.data_path, "data/papers.csv");
        assert_eq!(config.base_url, "https://openaccess.thecvf.com/");
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let config: PaperdeckConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "https://openaccess.thecvf.com/");
    }
}
