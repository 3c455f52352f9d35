//! Editor settings.
//!
//! Stored as TOML in the platform config directory:
//! - macOS: ~/Library/Application Support/org.cdisc.Define Editor/
//! - Windows: %APPDATA%/cdisc/Define Editor/config/
//! - Linux: ~/.config/define-editor/
//!
//! ```toml
//! [history]
//! limit = 100
//!
//! [autosave]
//! enabled = true
//! interval_secs = 60
//! debounce_ms = 2000
//! max_delay_ms = 30000
//!
//! [integrity]
//! strict = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use define_store::{DEFAULT_HISTORY_LIMIT, IntegrityPolicy, StoreConfig};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::autosave::AutoSaveConfig;
use crate::error::{PersistenceError, Result};
use crate::io::write_atomic;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "cdisc";
const APP_NAME: &str = "Define Editor";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub history: HistorySettings,
    pub autosave: AutoSaveConfig,
    pub integrity: IntegritySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo frames kept.
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegritySettings {
    /// Fail actions that break document integrity. Unset follows the build:
    /// strict in debug builds, lenient in release builds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl IntegritySettings {
    pub fn policy(&self) -> IntegrityPolicy {
        match self.strict {
            Some(true) => IntegrityPolicy::Strict,
            Some(false) => IntegrityPolicy::Lenient,
            None => IntegrityPolicy::default(),
        }
    }
}

impl EditorSettings {
    /// Default settings file location, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load from the default location.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("could not determine settings path, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or invalid.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(Some(settings)) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(error = %err, "{}; using defaults", err.user_message());
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file is `Ok(None)`.
    pub fn try_load_from(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| PersistenceError::Settings {
                path: path.to_path_buf(),
                source: e,
            })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PersistenceError::Serialization {
                what: "settings",
                source: Box::new(e),
            })?;
        write_atomic(path, content.as_bytes())?;
        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Store configuration derived from these settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            history_limit: self.history.limit,
            integrity: self.integrity.policy(),
            ..StoreConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[autosave]\ninterval_secs = 15\n\n[integrity]\nstrict = false\n").unwrap();

        let settings = EditorSettings::load_from(&path);
        assert_eq!(settings.autosave.interval_secs, 15);
        assert_eq!(settings.autosave.debounce_ms, 2000);
        assert_eq!(settings.history.limit, DEFAULT_HISTORY_LIMIT);

        let config = settings.store_config();
        assert_eq!(config.integrity, IntegrityPolicy::Lenient);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[history]\nlimit = \"many\"\n").unwrap();

        assert!(matches!(
            EditorSettings::try_load_from(&path),
            Err(PersistenceError::Settings { .. })
        ));
        assert_eq!(EditorSettings::load_from(&path), EditorSettings::default());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(EditorSettings::try_load_from(&path).unwrap().is_none());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join(CONFIG_FILENAME);
        let settings = EditorSettings {
            history: HistorySettings { limit: 20 },
            integrity: IntegritySettings { strict: Some(true) },
            ..EditorSettings::default()
        };

        settings.save_to(&path).unwrap();
        assert_eq!(EditorSettings::load_from(&path), settings);
    }
}
