use crate::error::{InvError, Result};
use crate::search::DEFAULT_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "invtrack.json";
const DEFAULT_INVENTORY_FILE: &str = "inventory_data.csv";
const DEFAULT_AUDIT_FILE: &str = "audit_log.csv";
const DEFAULT_USER: &str = "Unknown";

/// Configuration for invtrack, stored in `<data dir>/invtrack.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvConfig {
    /// Inventory file name, relative to the data dir
    #[serde(default = "default_inventory_file")]
    pub inventory_file: String,

    /// Audit log file name, relative to the data dir
    #[serde(default = "default_audit_file")]
    pub audit_file: String,

    /// Search text that means "no filter" (what the search box shows when empty)
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,

    /// User recorded in the audit log when none is given
    #[serde(default = "default_user")]
    pub default_user: String,
}

fn default_inventory_file() -> String {
    DEFAULT_INVENTORY_FILE.to_string()
}

fn default_audit_file() -> String {
    DEFAULT_AUDIT_FILE.to_string()
}

fn default_search_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

impl Default for InvConfig {
    fn default() -> Self {
        Self {
            inventory_file: default_inventory_file(),
            audit_file: default_audit_file(),
            search_placeholder: default_search_placeholder(),
            default_user: default_user(),
        }
    }
}

impl InvConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(InvError::Io)?;
        let config: InvConfig = serde_json::from_str(&content).map_err(InvError::Config)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(InvError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(InvError::Config)?;
        fs::write(config_path, content).map_err(InvError::Io)?;
        Ok(())
    }

    pub fn path_in<P: AsRef<Path>>(config_dir: P) -> PathBuf {
        config_dir.as_ref().join(CONFIG_FILENAME)
    }

    pub fn exists_in<P: AsRef<Path>>(config_dir: P) -> bool {
        Self::path_in(config_dir).exists()
    }

    pub fn inventory_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.inventory_file)
    }

    pub fn audit_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.audit_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = InvConfig::default();
        assert_eq!(config.inventory_file, "inventory_data.csv");
        assert_eq!(config.audit_file, "audit_log.csv");
        assert_eq!(config.search_placeholder, "Search...");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = InvConfig::load(dir.path()).unwrap();
        assert_eq!(config, InvConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data");

        let config = InvConfig {
            audit_file: "trail.csv".to_string(),
            ..InvConfig::default()
        };
        config.save(&nested).unwrap();
        assert!(InvConfig::exists_in(&nested));

        let loaded = InvConfig::load(&nested).unwrap();
        assert_eq!(loaded.audit_file, "trail.csv");
        assert_eq!(loaded.audit_path(&nested), nested.join("trail.csv"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "default_user": "warehouse" }"#,
        )
        .unwrap();

        let config = InvConfig::load(dir.path()).unwrap();
        assert_eq!(config.default_user, "warehouse");
        assert_eq!(config.inventory_file, "inventory_data.csv");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();
        assert!(matches!(
            InvConfig::load(dir.path()),
            Err(InvError::Config(_))
        ));
    }
}
