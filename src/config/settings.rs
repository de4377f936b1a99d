//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Chat the bot posts event announcements into
    pub events_channel_id: i64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration (conversation drafts)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Event lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventsConfig {
    /// How long a created event stays open before it is archived
    pub lifetime_seconds: u64,
    /// How often the expiry sweep runs. Expiry fires on the first sweep
    /// after the deadline, so events live up to one interval longer than
    /// `lifetime_seconds`.
    pub poll_interval_seconds: u64,
    /// Optional TOML file replacing the built-in preset catalog
    pub presets_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_file_size: String,
    pub max_files: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("RAIDBUDDY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::RaidBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                events_channel_id: 0,
            },
            database: DatabaseConfig {
                url: "sqlite://raidbuddy.db".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "raidbuddy:".to_string(),
                ttl_seconds: 3600,
            },
            events: EventsConfig {
                lifetime_seconds: 3600,
                poll_interval_seconds: 60,
                presets_path: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/raidbuddy".to_string(),
                max_file_size: "10MB".to_string(),
                max_files: 5,
            },
        }
    }
}
