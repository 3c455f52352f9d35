//! Auto-save configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for auto-save behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    /// Whether auto-save is enabled.
    pub enabled: bool,

    /// How often the worker checks for unsaved changes, in seconds.
    pub interval_secs: u64,

    /// Debounce delay in milliseconds.
    ///
    /// After a change, the system waits this long before saving.
    /// Additional changes reset the timer.
    pub debounce_ms: u64,

    /// Maximum delay before forcing a save.
    ///
    /// If changes keep coming, save after this many milliseconds
    /// since the first unsaved change.
    pub max_delay_ms: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
            debounce_ms: 2000,
            max_delay_ms: 30_000,
        }
    }
}

impl AutoSaveConfig {
    /// Create a disabled auto-save config.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Tick interval of the worker. Never zero.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    /// Check if auto-save should trigger given the time since last change
    /// and time since first unsaved change.
    pub fn should_save(&self, since_last_change_ms: u64, since_first_unsaved_ms: u64) -> bool {
        self.enabled
            && (since_last_change_ms >= self.debounce_ms
                || since_first_unsaved_ms >= self.max_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AutoSaveConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(60));
    }

    #[test]
    fn disabled_never_saves() {
        assert!(!AutoSaveConfig::disabled().should_save(10_000, 60_000));
    }

    #[test]
    fn debounce_then_max_delay() {
        let config = AutoSaveConfig::default();
        assert!(!config.should_save(1000, 1000));
        assert!(config.should_save(2500, 2500));

        // Rapid changes: forced once the max delay is exceeded.
        assert!(!config.should_save(500, 25_000));
        assert!(config.should_save(500, 35_000));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = AutoSaveConfig {
            interval_secs: 0,
            ..AutoSaveConfig::default()
        };
        assert_eq!(config.interval(), Duration::from_secs(1));
    }
}
