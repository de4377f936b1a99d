//! Error handling for RaidBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for RaidBuddy application
#[derive(Error, Debug)]
pub enum RaidBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown event type: {key}")]
    UnknownPresetType { key: String },

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("Role is full: {role}")]
    RoleFull { role: String },

    #[error("No active event")]
    NoActiveEvent,

    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for RaidBuddy operations
pub type Result<T> = std::result::Result<T, RaidBuddyError>;

impl RaidBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            RaidBuddyError::Database(_) => false,
            RaidBuddyError::Migration(_) => false,
            RaidBuddyError::Telegram(_) => true,
            RaidBuddyError::Redis(_) => true,
            RaidBuddyError::Serialization(_) => false,
            RaidBuddyError::Io(_) => true,
            RaidBuddyError::Scheduler(_) => false,
            RaidBuddyError::Config(_) => false,
            RaidBuddyError::UnknownPresetType { .. } => true,
            RaidBuddyError::UnknownRole { .. } => true,
            RaidBuddyError::RoleFull { .. } => true,
            RaidBuddyError::NoActiveEvent => true,
            RaidBuddyError::PersistenceUnavailable(_) => true,
            RaidBuddyError::InvalidStateTransition { .. } => false,
            RaidBuddyError::InvalidInput(_) => false,
        }
    }

    /// Short user-visible text for failures the bot reports back to the
    /// requesting user. Infrastructure errors return `None` and are only
    /// logged; handlers fall back to a generic message for those.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            RaidBuddyError::UnknownPresetType { .. } => Some("❌ Invalid event type."),
            RaidBuddyError::UnknownRole { .. } => Some("❌ Unknown role."),
            RaidBuddyError::RoleFull { .. } => Some("⚠️ That role is already full."),
            RaidBuddyError::NoActiveEvent => Some("❌ No active event."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_cover_registration_failures() {
        assert!(RaidBuddyError::RoleFull { role: "Tank".into() }
            .user_message()
            .unwrap()
            .contains("full"));
        assert!(RaidBuddyError::NoActiveEvent.user_message().is_some());
        assert!(RaidBuddyError::UnknownRole { role: "Bard".into() }.user_message().is_some());
        assert!(RaidBuddyError::Config("x".into()).user_message().is_none());
    }

    #[test]
    fn test_registration_failures_are_recoverable() {
        assert!(RaidBuddyError::RoleFull { role: "Tank".into() }.is_recoverable());
        assert!(RaidBuddyError::NoActiveEvent.is_recoverable());
        assert!(!RaidBuddyError::Config("bad".into()).is_recoverable());
    }
}
