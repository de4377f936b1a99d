//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{RaidBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_events_config(&settings.events)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(RaidBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.events_channel_id == 0 {
        return Err(RaidBuddyError::Config(
            "Events channel ID is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(RaidBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(RaidBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(RaidBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(RaidBuddyError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate event lifecycle configuration
fn validate_events_config(config: &super::EventsConfig) -> Result<()> {
    if config.lifetime_seconds == 0 {
        return Err(RaidBuddyError::Config(
            "Event lifetime must be greater than 0".to_string()
        ));
    }

    if config.poll_interval_seconds == 0 {
        return Err(RaidBuddyError::Config(
            "Expiry poll interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RaidBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RaidBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:token".to_string();
        settings.bot.events_channel_id = -1001234567890;
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut settings = valid_settings();
        settings.bot.token = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_missing_channel_rejected() {
        let mut settings = valid_settings();
        settings.bot.events_channel_id = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_lifetime_rejected() {
        let mut settings = valid_settings();
        settings.events.lifetime_seconds = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut settings = valid_settings();
        settings.events.poll_interval_seconds = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
