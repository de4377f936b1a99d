//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod preset;
pub mod roster;

// Re-export commonly used models
pub use event::{ActiveEvent, EventMeta};
pub use preset::{RolePreset, RoleSlot};
pub use roster::{Participant, Roster};
