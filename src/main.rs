mod commands;
mod config;
mod constants;
mod conversation;
mod database;
mod error;
mod handlers;
mod models;
mod schedule;
mod services;
mod utils;

use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    config::Config,
    constants::LOG_DIRECTIVE,
    database::{BirthdayStore, Database, MemoryStore},
    handlers::handle_message,
    models::{Data, Error},
    schedule::{Clock, DailyTrigger, NotificationScheduler, SystemClock},
    services::{DiscordNotifier, Greeter, HuggingFaceGreeter, StaticGreeter},
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    initialize_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let trigger = match DailyTrigger::at(config.notify_time) {
        Ok(trigger) => trigger,
        Err(e) => {
            error!("Failed to build the notification schedule: {}", e);
            std::process::exit(1);
        }
    };

    let store = match open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.timezone));
    let data = Data::new(store, build_greeter(&config), clock);

    if let Err(e) = run_bot(config.discord_token, data, trigger).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Postgres when a URL is configured, otherwise an in-memory store
async fn open_store(config: &Config) -> Result<Arc<dyn BirthdayStore>, sqlx::Error> {
    match &config.database_url {
        Some(url) => {
            let db = Database::new(url, config.database_max_connections).await?;
            Ok(Arc::new(db))
        }
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

fn build_greeter(config: &Config) -> Arc<dyn Greeter> {
    match &config.hf_api_token {
        Some(token) => {
            info!("Greetings will be generated with {}", config.hf_model);
            Arc::new(HuggingFaceGreeter::new(token.clone(), &config.hf_model))
        }
        None => Arc::new(StaticGreeter),
    }
}

/// Run the Discord client and the notification scheduler until Ctrl-C
async fn run_bot(token: String, data: Data, trigger: DailyTrigger) -> Result<(), Error> {
    let framework_data = data.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions::<Data, Error> {
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    if let serenity::FullEvent::Message { new_message } = event {
                        handle_message(ctx, new_message, data).await;
                    }
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Bot is ready as {}", ready.user.name);
                Ok(framework_data)
            })
        })
        .build();

    // Commands are plain text, so message content is required
    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    let scheduler = NotificationScheduler::new(
        data.store.clone(),
        Arc::new(DiscordNotifier::new(client.http.clone())),
        data.clock.clone(),
        trigger,
    )
    .start();
    let shard_manager = client.shard_manager.clone();

    info!("Starting bot...");
    let result: Result<(), Error> = tokio::select! {
        result = client.start() => result.map_err(Into::into),
        signal = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            signal.map_err(Into::into)
        }
    };

    scheduler.stop().await;
    shard_manager.shutdown_all().await;
    data.store.close().await;
    info!("Bot stopped");

    result
}
