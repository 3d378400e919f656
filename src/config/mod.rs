//! Configuration management for ScanMatch
//!
//! Settings live in `config/dashboard.json` relative to the working
//! directory. Every field has a default, so a partial file (or no file) is
//! valid:
//! - `api_base_url`: fixed backend endpoint, no runtime negotiation
//! - `poll_interval_secs` / `poll_aggregates`: poll scheduler cadence
//! - `timestamp_format`: chrono pattern for the scan table
//! - `notifications` / `pulse`: feedback phase durations
//! - `audio`: cue player and sound files

pub mod loader;
pub mod validator;

use crate::error::ConfigError;
use crate::feedback::PhaseTimings;
use crate::render::table::DEFAULT_TIMESTAMP_FORMAT;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard.json";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub player: String,
    pub pass_sound: PathBuf,
    pub fail_sound: PathBuf,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            player: "paplay".to_string(),
            pass_sound: PathBuf::from("assets/sounds/pass.wav"),
            fail_sound: PathBuf::from("assets/sounds/fail.wav"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub poll_interval_secs: u64,
    pub poll_aggregates: bool,
    pub timestamp_format: String,
    pub notifications: PhaseTimings,
    pub pulse: PhaseTimings,
    pub audio: AudioConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            poll_interval_secs: 10,
            poll_aggregates: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            notifications: PhaseTimings::new(300, 3000, 300),
            pulse: PhaseTimings::new(50, 250, 400),
            audio: AudioConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Loads the dashboard configuration with graceful fallback
pub struct ConfigManager;

impl ConfigManager {
    /// Load from `config/dashboard.json`, or defaults if absent or invalid
    pub fn load() -> DashboardConfig {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from `path`. A missing file is normal; an unreadable, malformed
    /// or invalid one is logged and replaced by defaults.
    pub fn load_from(path: &Path) -> DashboardConfig {
        match loader::load_config_from_file(path).and_then(|config| {
            validator::validate_config(&config)?;
            Ok(config)
        }) {
            Ok(config) => {
                log::info!("[Config] Loaded {}", path.display());
                config
            }
            Err(ConfigError::FileNotFound(_)) => {
                log::info!("[Config] {} not found, using defaults", path.display());
                DashboardConfig::default()
            }
            Err(e) => {
                log::warn!("[Config] {} rejected ({}), using defaults", path.display(), e);
                DashboardConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert!(config.poll_aggregates);
        assert_eq!(config.notifications.total(), Duration::from_millis(3600));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"api_base_url": "http://scanner-host:9000", "audio": {"enabled": false}}"#)
                .expect("partial config");
        assert_eq!(config.api_base_url, "http://scanner-host:9000");
        assert_eq!(config.poll_interval_secs, 10);
        assert!(!config.audio.enabled);
        assert_eq!(config.audio.player, "paplay");
    }

    #[test]
    fn test_load_falls_back_on_missing_and_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.json");
        assert_eq!(ConfigManager::load_from(&missing), DashboardConfig::default());

        let invalid = dir.path().join("bad.json");
        std::fs::write(&invalid, r#"{"poll_interval_secs": 0}"#).expect("write");
        assert_eq!(ConfigManager::load_from(&invalid), DashboardConfig::default());

        let valid = dir.path().join("good.json");
        std::fs::write(&valid, r#"{"poll_interval_secs": 3}"#).expect("write");
        assert_eq!(ConfigManager::load_from(&valid).poll_interval_secs, 3);
    }
}
