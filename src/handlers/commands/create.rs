//! Event creation command handlers
//!
//! /create starts the creation flow: the user picks a preset from an
//! inline keyboard, then answers three free-text questions in a private
//! conversation. /cancel abandons a draft.

use teloxide::{Bot, types::{InlineKeyboardButton, InlineKeyboardMarkup, Message}, prelude::*};
use tracing::debug;
use crate::utils::errors::{RaidBuddyError, Result};
use crate::services::ServiceFactory;
use crate::state::StateStorage;

/// Handle /create command - show the preset selection keyboard
pub async fn handle_create(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        RaidBuddyError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /create command");

    // The creation dialogue runs in a private chat so the questions do
    // not clutter the guild channel
    if !chat_id.is_user() {
        bot.send_message(chat_id, "Please message me directly to create an event.")
            .await?;
        return Ok(());
    }

    let keyboard = InlineKeyboardMarkup::new(
        services
            .catalog
            .all()
            .iter()
            .map(|preset| {
                vec![InlineKeyboardButton::callback(
                    format!("⚔️ {}", preset.title),
                    format!("preset:{}", preset.key),
                )]
            })
            .collect::<Vec<_>>(),
    );

    bot.send_message(chat_id, "What kind of event? Pick a preset:")
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Handle /cancel command - abandon an event creation draft
pub async fn handle_cancel(
    bot: Bot,
    msg: Message,
    state_storage: StateStorage,
) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        RaidBuddyError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    if state_storage.load_context(user_id).await?.is_some() {
        state_storage.delete_context(user_id).await?;
        debug!(user_id = user_id, "Creation draft cancelled");
        bot.send_message(chat_id, "🗑️ Event creation cancelled.").await?;
    } else {
        bot.send_message(chat_id, "Nothing to cancel.").await?;
    }

    Ok(())
}
