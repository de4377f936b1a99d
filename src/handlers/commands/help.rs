//! Help command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let help_text = "🤖 RaidBuddy Help\n\n\
        /create - Create a new guild event\n\
        /roster - Show the current event roster\n\
        /cancel - Abort event creation in progress\n\
        /help - Show this help message\n\n\
        Sign up by pressing a role button under the event announcement. \
        Pressing another role moves you there; the leave button removes you.";

    bot.send_message(msg.chat.id, help_text).await?;
    Ok(())
}
