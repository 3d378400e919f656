//! Semantic validation of a loaded configuration.

use super::DashboardConfig;
use crate::error::ConfigError;
use crate::feedback::PhaseTimings;
use chrono::format::{Item, StrftimeItems};

pub fn validate_config(config: &DashboardConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.api_base_url)?;

    if config.poll_interval_secs == 0 {
        return Err(ConfigError::ValidationFailed(
            "poll_interval_secs must be greater than zero".to_string(),
        ));
    }

    validate_timestamp_format(&config.timestamp_format)?;
    validate_timings("notifications", &config.notifications)?;
    validate_timings("pulse", &config.pulse)?;

    if config.audio.enabled && config.audio.player.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "audio.player cannot be empty while audio is enabled".to_string(),
        ));
    }

    Ok(())
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(raw).map_err(|e| {
        ConfigError::ValidationFailed(format!("api_base_url '{}' is not a URL: {}", raw, e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationFailed(format!(
            "api_base_url must use http or https, got '{}'",
            other
        ))),
    }
}

/// Reject patterns chrono cannot render
pub fn validate_timestamp_format(fmt: &str) -> Result<(), ConfigError> {
    if fmt.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "timestamp_format cannot be empty".to_string(),
        ));
    }
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::ValidationFailed(format!(
            "timestamp_format '{}' is not a valid strftime pattern",
            fmt
        )));
    }
    Ok(())
}

fn validate_timings(name: &str, timings: &PhaseTimings) -> Result<(), ConfigError> {
    if timings.total().is_zero() {
        return Err(ConfigError::ValidationFailed(format!(
            "{} durations cannot all be zero",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DashboardConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_values_rejected() {
        let mut config = DashboardConfig::default();
        config.api_base_url = "127.0.0.1:8000/api".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = DashboardConfig::default();
        config.timestamp_format = "%Y-%Q".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = DashboardConfig::default();
        config.pulse = PhaseTimings::new(0, 0, 0);
        assert!(validate_config(&config).is_err());

        let mut config = DashboardConfig::default();
        config.audio.player = "  ".to_string();
        assert!(validate_config(&config).is_err());
        config.audio.enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}
