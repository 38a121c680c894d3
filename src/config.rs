use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    ACTION_PATH, CATALOG_TIMEOUT_SECS, DEFAULT_BASE_URL, DEFAULT_LOG_FILE, LOTS_PATH,
};

/// User configuration, read from `<config dir>/lotpick/config.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub lots_path: String,
    pub action_path: String,
    /// Identifier forwarded with submissions, if the host has one
    pub user_id: Option<i64>,
    pub log_file: PathBuf,
    pub catalog_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            lots_path: String::from(LOTS_PATH),
            action_path: String::from(ACTION_PATH),
            user_id: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            catalog_timeout_secs: CATALOG_TIMEOUT_SECS,
        }
    }
}

/// Resolved URLs the network layer talks to
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    pub lots_url: String,
    pub action_url: String,
    pub catalog_timeout: Duration,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lotpick").join("config.json"))
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn endpoints(&self) -> Endpoints {
        let base = self.base_url.trim_end_matches('/');
        Endpoints {
            lots_url: format!("{}{}", base, self.lots_path),
            action_url: format!("{}{}", base, self.action_path),
            catalog_timeout: Duration::from_secs(self.catalog_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"base_url": "https://lots.example.com/", "user_id": 42}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.user_id, Some(42));
        assert_eq!(config.lots_path, LOTS_PATH);

        let endpoints = config.endpoints();
        assert_eq!(endpoints.lots_url, "https://lots.example.com/api/lots");
        assert_eq!(endpoints.action_url, "https://lots.example.com/api/miniapp-action");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
