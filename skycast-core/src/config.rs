use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::http::DEFAULT_TIMEOUT;

/// Environment variable holding the Visual Crossing API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Visual Crossing API key, used for moon phase lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request HTTP timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Pick the API key: command line first, then environment, then this file.
    /// Blank values are skipped.
    pub fn resolve_api_key(&self, flag: Option<String>, env: Option<String>) -> Option<String> {
        [flag, env, self.api_key.clone()]
            .into_iter()
            .flatten()
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env_and_file() {
        let cfg = Config { api_key: Some("FILE".into()), ..Config::default() };

        let key = cfg.resolve_api_key(Some("FLAG".into()), Some("ENV".into()));
        assert_eq!(key.as_deref(), Some("FLAG"));
    }

    #[test]
    fn env_wins_over_file() {
        let cfg = Config { api_key: Some("FILE".into()), ..Config::default() };

        let key = cfg.resolve_api_key(None, Some("ENV".into()));
        assert_eq!(key.as_deref(), Some("ENV"));
    }

    #[test]
    fn file_is_last_resort_and_blanks_are_skipped() {
        let cfg = Config { api_key: Some(" FILE ".into()), ..Config::default() };

        let key = cfg.resolve_api_key(Some("".into()), Some("   ".into()));
        assert_eq!(key.as_deref(), Some("FILE"));
    }

    #[test]
    fn no_key_anywhere() {
        assert_eq!(Config::default().resolve_api_key(None, None), None);
    }

    #[test]
    fn timeout_defaults_to_five_seconds() {
        assert_eq!(Config::default().timeout(), Duration::from_secs(5));

        let zero = Config { timeout_secs: Some(0), ..Config::default() };
        assert_eq!(zero.timeout(), Duration::from_secs(5));

        let custom = Config { timeout_secs: Some(12), ..Config::default() };
        assert_eq!(custom.timeout(), Duration::from_secs(12));
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.save_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("api_key = \"KEY\""));
        assert!(!written.contains("timeout_secs"));

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
