//! Command handlers module
//!
//! This module contains handlers for all bot commands like /create, /roster, etc.

pub mod create;
pub mod help;
pub mod roster;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::state::StateStorage;

/// All available bot commands
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "RaidBuddy commands:")]
pub enum Command {
    #[command(description = "Create a new guild event")]
    Create,
    #[command(description = "Show the current event roster")]
    Roster,
    #[command(description = "Abort event creation in progress")]
    Cancel,
    #[command(description = "Show help information")]
    Help,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: ServiceFactory,
    state_storage: StateStorage,
) -> Result<()> {
    match cmd {
        Command::Create => create::handle_create(bot, msg, services).await,
        Command::Roster => roster::handle_roster(bot, msg, services).await,
        Command::Cancel => create::handle_cancel(bot, msg, state_storage).await,
        Command::Help => help::handle_help(bot, msg).await,
    }
}
