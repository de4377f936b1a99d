//! Message handlers module
//!
//! Handles incoming text messages. The only stateful conversation is the
//! event-creation dialogue: date, time and location answers collected in a
//! private chat after a preset was picked.

use teloxide::{Bot, types::{ChatId, Message, ParseMode}, prelude::*};
use tracing::{debug, error, info, warn};
use crate::utils::errors::{RaidBuddyError, Result};
use crate::utils::logging::log_event_action;
use crate::models::event::EventMeta;
use crate::services::ServiceFactory;
use crate::state::{ConversationContext, ScenarioManager, StateStorage};
use crate::handlers::{roster_keyboard, GENERIC_ERROR_TEXT};

/// Handle incoming text messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
    scenario_manager: ScenarioManager,
    state_storage: StateStorage,
) -> Result<()> {
    let user = match msg.from.as_ref() {
        Some(user) => user,
        None => return Ok(()),
    };

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing message");

    // Stateful conversations only happen in private chats
    if !chat_id.is_user() {
        return Ok(());
    }

    if let Some(context) = state_storage.load_context(user_id).await? {
        return handle_conversation_message(
            bot, msg, context, services, scenario_manager, state_storage,
        )
        .await;
    }

    bot.send_message(chat_id, "Use /create to set up an event, or /help for all commands.")
        .await?;

    Ok(())
}

/// Handle conversation-based messages (when user is in a scenario)
async fn handle_conversation_message(
    bot: Bot,
    msg: Message,
    context: ConversationContext,
    services: ServiceFactory,
    scenario_manager: ScenarioManager,
    state_storage: StateStorage,
) -> Result<()> {
    let scenario = context.scenario.as_deref().unwrap_or("");
    let step = context.step.as_deref().unwrap_or("");

    debug!(scenario = scenario, step = step, "Handling conversation message");

    match (scenario, step) {
        ("event_creation", "date_input") => {
            handle_answer(bot, msg, context, "date", "time_input", scenario_manager, state_storage).await
        }
        ("event_creation", "time_input") => {
            handle_answer(bot, msg, context, "time", "location_input", scenario_manager, state_storage).await
        }
        ("event_creation", "location_input") => {
            handle_location_input(bot, msg, context, services, scenario_manager, state_storage).await
        }
        _ => {
            warn!(scenario = scenario, step = step, "Unknown conversation state");
            state_storage.delete_context(context.user_id).await?;
            bot.send_message(msg.chat.id, "Use /create to set up an event, or /help for all commands.")
                .await?;
            Ok(())
        }
    }
}

/// Store a free-text answer for the current step and ask the next question
async fn handle_answer(
    bot: Bot,
    msg: Message,
    mut context: ConversationContext,
    data_key: &str,
    next_step: &str,
    scenario_manager: ScenarioManager,
    state_storage: StateStorage,
) -> Result<()> {
    let chat_id = msg.chat.id;
    let answer = msg.text().unwrap_or("").trim();

    if let Err(e) = scenario_manager.validate_input(&context, answer) {
        bot.send_message(chat_id, e.to_string()).await?;
        return Ok(());
    }

    context.set_data(data_key, answer)?;
    scenario_manager.next_step(&mut context, next_step)?;
    state_storage.save_context(&context).await?;

    if let Some(prompt) = scenario_manager.prompt_for(&context) {
        bot.send_message(chat_id, prompt).await?;
    }

    Ok(())
}

/// Final answer: assemble the event, create it and announce it
async fn handle_location_input(
    bot: Bot,
    msg: Message,
    mut context: ConversationContext,
    services: ServiceFactory,
    scenario_manager: ScenarioManager,
    state_storage: StateStorage,
) -> Result<()> {
    let user_id = context.user_id;
    let chat_id = msg.chat.id;
    let location = msg.text().unwrap_or("").trim();

    if let Err(e) = scenario_manager.validate_input(&context, location) {
        bot.send_message(chat_id, e.to_string()).await?;
        return Ok(());
    }
    context.set_data("location", location)?;

    let preset_key = context.get_string("preset").ok_or_else(|| {
        RaidBuddyError::InvalidInput("Creation draft is missing the preset".to_string())
    })?;
    let meta = EventMeta {
        date: context.get_string("date").unwrap_or_default(),
        time: context.get_string("time").unwrap_or_default(),
        location: location.to_string(),
    };

    // The draft is consumed either way; a failed create should not trap
    // the user in the dialogue
    state_storage.delete_context(user_id).await?;

    match services.event_service.create(&preset_key, meta, user_id).await {
        Ok(view) => {
            let channel = ChatId(services.settings.bot.events_channel_id);
            bot.send_message(channel, view.text())
                .parse_mode(ParseMode::Markdown)
                .reply_markup(roster_keyboard(&view))
                .await?;

            bot.send_message(chat_id, "✅ Event created and announced!").await?;
            log_event_action(&preset_key, "created", Some(user_id), None);
            info!(user_id = user_id, preset = %preset_key, "Event announced");
        }
        Err(e) => {
            error!(user_id = user_id, preset = %preset_key, error = %e, "Event creation failed");
            bot.send_message(chat_id, e.user_message().unwrap_or(GENERIC_ERROR_TEXT))
                .await?;
        }
    }

    Ok(())
}
