//! RaidBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use teloxide::{prelude::*, types::{ChatId, Update}};
use teloxide::dispatching::UpdateHandler;
use tracing::{error, info, warn};

use RaidBuddy::{
    config::Settings,
    utils::logging,
    database::{connection::{create_pool, run_migrations, DatabaseConfig}, EventRepository},
    presets::PresetCatalog,
    services::ServiceFactory,
    scheduler,
    state::{ScenarioManager, StateStorage},
    handlers::{callbacks, commands, messages},
};

use RaidBuddy::handlers::commands::Command;
use teloxide::utils::command::BotCommands;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting RaidBuddy Telegram Bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: Duration::from_secs(30),
    };
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize Redis-backed conversation state
    info!("Connecting to Redis...");
    let state_storage = StateStorage::new(settings.redis.clone()).await?;

    // Load the event preset catalog
    info!("Loading event presets...");
    let catalog = Arc::new(PresetCatalog::load(settings.events.presets_path.as_deref()).await?);

    // Initialize services
    let event_repository = EventRepository::new(db_pool);
    let services = ServiceFactory::new(settings.clone(), catalog, event_repository);
    let scenario_manager = ScenarioManager::new();

    // Start the expiry poller
    scheduler::start_scheduler(
        services.event_service.clone(),
        Duration::from_secs(settings.events.poll_interval_seconds),
    )
    .await?;

    // Initialize bot
    let bot = Bot::new(settings.bot.token.clone());

    info!("Setting up bot handlers...");

    // Wrap dependencies for injection
    let services_arc = Arc::new(services);
    let scenario_manager_arc = Arc::new(scenario_manager);
    let state_storage_arc = Arc::new(state_storage);

    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![
            services_arc,
            scenario_manager_arc,
            state_storage_arc
        ])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    // Register the command menu with Telegram; best-effort
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    // Let the guild know the bot is back; best-effort
    let channel = ChatId(settings.bot.events_channel_id);
    if let Err(e) = bot
        .send_message(channel, "🤖 RaidBuddy is online! Use /create to set up a new event.")
        .await
    {
        warn!(error = %e, "Failed to send startup notice");
    }

    info!("RaidBuddy bot is ready!");

    dispatcher.dispatch().await;

    info!("RaidBuddy bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle regular messages
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceFactory>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let services = (*services).clone();
    let state_storage = (*state_storage).clone();

    if let Err(e) = commands::handle_command(bot, msg, cmd, services, state_storage).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    scenario_manager: Arc<ScenarioManager>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let services = (*services).clone();
    let scenario_manager = (*scenario_manager).clone();
    let state_storage = (*state_storage).clone();

    if let Err(e) =
        messages::handle_message(bot, msg, services, scenario_manager, state_storage).await
    {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    services: Arc<ServiceFactory>,
    scenario_manager: Arc<ScenarioManager>,
    state_storage: Arc<StateStorage>,
) -> HandlerResult {
    let services = (*services).clone();
    let scenario_manager = (*scenario_manager).clone();
    let state_storage = (*state_storage).clone();

    if let Err(e) =
        callbacks::handle_callback_query(bot, query, services, scenario_manager, state_storage).await
    {
        error!(error = %e, "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
