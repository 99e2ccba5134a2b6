use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        utils::{app_data_dir, config_file_in, ensure_dir, store_dir_in, write_atomic},
        years::DEFAULT_YEAR_WINDOW,
    },
    errors::Result,
    storage::{StorageKeys, DEFAULT_KEY_PREFIX, DEFAULT_TAB_KEY},
};

const DEFAULT_TAB: &str = "ledger";

/// User preferences for the ledger grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "Config::default_tab_key")]
    pub tab_key: String,
    #[serde(default = "Config::default_tab")]
    pub default_tab: String,
    #[serde(default = "Config::default_year_window")]
    pub year_window: u32,
    #[serde(default = "Config::default_color")]
    pub color: bool,
    /// Optional custom directory for stored blobs. Defaults to `<base>/store`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_prefix: Self::default_key_prefix(),
            tab_key: Self::default_tab_key(),
            default_tab: Self::default_tab(),
            year_window: Self::default_year_window(),
            color: Self::default_color(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_key_prefix() -> String {
        DEFAULT_KEY_PREFIX.into()
    }

    pub fn default_tab_key() -> String {
        DEFAULT_TAB_KEY.into()
    }

    pub fn default_tab() -> String {
        DEFAULT_TAB.into()
    }

    pub fn default_year_window() -> u32 {
        DEFAULT_YEAR_WINDOW
    }

    pub fn default_color() -> bool {
        true
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(self.key_prefix.clone(), self.tab_key.clone())
    }

    pub fn resolve_store_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => store_dir_in(base),
        }
    }
}

/// Loads and saves [`Config`] as `config.json` under the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    /// Reads the config, falling back to defaults when the file is missing. Unknown or
    /// missing fields take their defaults; a file that is not JSON is an error.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_keys().year_key(2026), "finance-2026");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            key_prefix: "budget-".into(),
            year_window: 2,
            color: false,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"year_window": 1}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.year_window, 1);
        assert_eq!(config.key_prefix, DEFAULT_KEY_PREFIX);
        assert!(config.color);
    }

    #[test]
    fn store_dir_defaults_under_base() {
        let base = Path::new("/tmp/finance-grid-base");
        let mut config = Config::default();
        assert_eq!(config.resolve_store_dir(base), base.join("store"));
        config.data_dir = Some(PathBuf::from("/elsewhere"));
        assert_eq!(config.resolve_store_dir(base), PathBuf::from("/elsewhere"));
    }
}
