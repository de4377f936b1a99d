//! RaidBuddy Telegram Bot
//!
//! A Telegram bot for Albion Online guild event coordination.
//! This library provides modular components for event announcements with
//! role rosters, button-based sign-ups with per-role capacities, a fixed
//! event lifetime with background expiry, and an archived event history.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod presets;
pub mod database;
pub mod scheduler;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RaidBuddyError, Result};

// Re-export main components for easy access
pub use database::EventRepository;
pub use presets::PresetCatalog;
pub use services::{EventService, ServiceFactory};
pub use state::{ScenarioManager, StateStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
