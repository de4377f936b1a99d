//! Roster command handler

use chrono::Utc;
use teloxide::{Bot, types::{Message, ParseMode}, prelude::*};
use tracing::debug;
use crate::utils::errors::Result;
use crate::utils::helpers::format_time_until;
use crate::services::ServiceFactory;

/// Handle /roster command - re-render the current event roster on demand
pub async fn handle_roster(
    bot: Bot,
    msg: Message,
    services: ServiceFactory,
) -> Result<()> {
    let chat_id = msg.chat.id;
    debug!(chat_id = ?chat_id, "Processing /roster command");

    if let Some((view, expires_at)) = services.event_service.current().await {
        let text = format!(
            "{}\n\n⏳ Sign-up closes in {}",
            view.text(),
            format_time_until(expires_at, Utc::now())
        );
        bot.send_message(chat_id, text)
            .parse_mode(ParseMode::Markdown)
            .await?;
    } else {
        bot.send_message(chat_id, "❌ No active event. Use /create to start one.")
            .await?;
    }

    Ok(())
}
