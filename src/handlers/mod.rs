//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for scenario-driven text input

pub mod commands;
pub mod callbacks;
pub mod messages;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use crate::services::RosterView;

/// Fallback reply when an error has no user-facing text of its own
pub const GENERIC_ERROR_TEXT: &str = "❌ Something went wrong, please try again.";

/// Build the sign-up keyboard for an announcement: role buttons five per
/// row, then status buttons, then the leave button.
pub fn roster_keyboard(view: &RosterView) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();

    for chunk in view.roles.chunks(5) {
        rows.push(
            chunk
                .iter()
                .map(|role| InlineKeyboardButton::callback(role.clone(), format!("join:{}", role)))
                .collect(),
        );
    }

    if !view.statuses.is_empty() {
        rows.push(
            view.statuses
                .iter()
                .map(|status| {
                    InlineKeyboardButton::callback(status.clone(), format!("join:{}", status))
                })
                .collect(),
        );
    }

    rows.push(vec![InlineKeyboardButton::callback("🚪 Leave event", "leave")]);

    InlineKeyboardMarkup::new(rows)
}
