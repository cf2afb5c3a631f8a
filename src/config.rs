//! Application configuration stored as config.json in the app data directory

use crate::constants::{DEFAULT_GROUPS_SHEET, DEFAULT_MEMBERS_SHEET, DEFAULT_SPREADSHEET_ID};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Id of the backing spreadsheet.
    pub spreadsheet_id: String,

    /// API key; read access to public sheets.
    pub api_key: Option<String>,

    /// Path to a service-account JSON key file; read/write access.
    pub service_account_key: Option<PathBuf>,

    // Sheet (tab) names
    pub members_sheet: String,
    pub groups_sheet: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            api_key: None,
            service_account_key: None,
            members_sheet: DEFAULT_MEMBERS_SHEET.to_string(),
            groups_sheet: DEFAULT_GROUPS_SHEET.to_string(),
        }
    }
}

impl Config {
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::path(data_dir);
        let mut config = match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(config) => {
                    debug!(path = %path.display(), "Config loaded");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    /// Environment overrides, for running against a sheet without touching
    /// the config file.
    fn apply_env(&mut self) {
        if let Ok(id) = std::env::var("DOJO_ROSTER_SHEET_ID") {
            if !id.is_empty() {
                self.spreadsheet_id = id;
            }
        }
        if let Ok(key) = std::env::var("DOJO_ROSTER_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = Self::path(data_dir);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save config");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize config"),
        }
    }

    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.json")
    }

    /// Without credentials the app falls back to the built-in sample roster.
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
            || self.service_account_key.is_some()
    }
}

/// Per-user data directory holding config.json and logs.
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dojo-roster")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_sample_sheet() {
        let config = Config::default();
        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.members_sheet, "Players");
        assert_eq!(config.groups_sheet, "Groups");
        assert!(!config.has_credentials());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.spreadsheet_id = "sheet-123".to_string();
        config.api_key = Some("key-456".to_string());
        config.save(dir.path());

        let loaded = Config::load(dir.path());
        assert_eq!(loaded.spreadsheet_id, "sheet-123");
        assert_eq!(loaded.api_key.as_deref(), Some("key-456"));
        assert!(loaded.has_credentials());
    }

    #[test]
    fn corrupt_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::path(dir.path()), "not json {").unwrap();
        let loaded = Config::load(dir.path());
        assert_eq!(loaded.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
    }

    #[test]
    fn partial_config_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            Config::path(dir.path()),
            r#"{"spreadsheet_id":"only-this"}"#,
        )
        .unwrap();
        let loaded = Config::load(dir.path());
        assert_eq!(loaded.spreadsheet_id, "only-this");
        assert_eq!(loaded.members_sheet, "Players");
    }

    #[test]
    fn empty_api_key_does_not_count_as_credentials() {
        let config = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };
        assert!(!config.has_credentials());
    }
}
