//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks:
//! preset selection during event creation, and the join/leave buttons on
//! the event announcement.

use teloxide::{Bot, types::{CallbackQuery, ChatId, ParseMode, User}, prelude::*};
use tracing::{debug, info, warn};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use crate::services::{RosterView, ServiceFactory};
use crate::state::{ConversationContext, ScenarioManager, StateStorage};
use crate::handlers::{roster_keyboard, GENERIC_ERROR_TEXT};

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: ServiceFactory,
    scenario_manager: ScenarioManager,
    state_storage: StateStorage,
) -> Result<()> {
    let user = query.from.clone();
    let user_id = user.id.0 as i64;

    let data = match query.data.clone() {
        Some(data) => data,
        None => {
            warn!(user_id = user_id, "Callback query without data");
            bot.answer_callback_query(query.id.clone()).await?;
            return Ok(());
        }
    };

    debug!(user_id = user_id, callback_data = %data, "Processing callback query");

    match data.split_once(':') {
        Some(("preset", key)) => {
            handle_preset_selected(bot, query, key, services, scenario_manager, state_storage).await
        }
        Some(("join", role)) => handle_join(bot, query, user, role, services).await,
        None if data == "leave" => handle_leave(bot, query, user_id, services).await,
        _ => {
            warn!(user_id = user_id, callback_data = %data, "Unknown callback data");
            bot.answer_callback_query(query.id.clone()).await?;
            Ok(())
        }
    }
}

/// Preset picked during /create: start the metadata dialogue
async fn handle_preset_selected(
    bot: Bot,
    query: CallbackQuery,
    preset_key: &str,
    services: ServiceFactory,
    scenario_manager: ScenarioManager,
    state_storage: StateStorage,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    if services.catalog.get(preset_key).is_none() {
        warn!(user_id = user_id, preset = preset_key, "Preset selection for unknown key");
        bot.answer_callback_query(query.id.clone())
            .text("❌ Invalid event type.")
            .show_alert(true)
            .await?;
        return Ok(());
    }

    // Answer first to clear the button loading state
    bot.answer_callback_query(query.id.clone()).await?;

    let mut context = ConversationContext::new(user_id);
    scenario_manager.start_scenario(&mut context, "event_creation")?;
    context.set_data("preset", preset_key)?;
    state_storage.save_context(&context).await?;

    info!(user_id = user_id, preset = preset_key, "Event creation dialogue started");

    if let Some(prompt) = scenario_manager.prompt_for(&context) {
        bot.send_message(chat_id, prompt).await?;
    }

    Ok(())
}

/// Join button on the announcement: claim a role slot
async fn handle_join(
    bot: Bot,
    query: CallbackQuery,
    user: User,
    role: &str,
    services: ServiceFactory,
) -> Result<()> {
    let user_id = user.id.0 as i64;
    let display_name = user.full_name();

    match services.event_service.claim(user_id, &display_name, role).await {
        Ok(view) => {
            update_announcement(&bot, &query, &view).await;
            bot.answer_callback_query(query.id.clone()).await?;
            log_user_action(user_id, "join", Some(role));
        }
        Err(e) => {
            debug!(user_id = user_id, role = role, error = %e, "Claim rejected");
            bot.answer_callback_query(query.id.clone())
                .text(e.user_message().unwrap_or(GENERIC_ERROR_TEXT))
                .show_alert(true)
                .await?;
        }
    }

    Ok(())
}

/// Leave button on the announcement: drop whatever role the user holds
async fn handle_leave(
    bot: Bot,
    query: CallbackQuery,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    match services.event_service.release(user_id).await {
        Ok((view, removed)) => {
            if removed {
                update_announcement(&bot, &query, &view).await;
                log_user_action(user_id, "leave", None);
            }
            let text = if removed {
                "🚪 You have been removed from the roster."
            } else {
                "You were not signed up."
            };
            bot.answer_callback_query(query.id.clone()).text(text).await?;
        }
        Err(e) => {
            debug!(user_id = user_id, error = %e, "Release rejected");
            bot.answer_callback_query(query.id.clone())
                .text(e.user_message().unwrap_or(GENERIC_ERROR_TEXT))
                .show_alert(true)
                .await?;
        }
    }

    Ok(())
}

/// Rewrite the announcement message the pressed button hangs off. Editing
/// is best-effort: Telegram rejects no-op edits (e.g. re-claiming the role
/// you already hold), and a stale message must not fail the claim itself.
async fn update_announcement(bot: &Bot, query: &CallbackQuery, view: &RosterView) {
    let message = match query.message.as_ref() {
        Some(message) => message,
        None => return,
    };

    if let Err(e) = bot
        .edit_message_text(message.chat().id, message.id(), view.text())
        .parse_mode(ParseMode::Markdown)
        .reply_markup(roster_keyboard(view))
        .await
    {
        warn!(error = %e, "Failed to update announcement message");
    }
}
