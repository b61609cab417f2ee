use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use ryujin_commands::handle_message;
use ryujin_core::{Context, config::BotConfig};
use ryujin_database::{Database, blacklist::BlacklistStore, warnings::InfractionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();
    let config = BotConfig::from_env()?;

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.discord_token.clone()));
    let bot_user = http
        .current_user()
        .await
        .context("failed to fetch bot user")?
        .model()
        .await?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("PostgreSQL connection established.");

    let db = Database::new(db_pool);
    db.migrate().await.context("failed to run migrations")?;
    let db = Arc::new(db);

    let infractions: Arc<dyn InfractionStore> = db.clone();
    let blacklist: Option<Arc<dyn BlacklistStore>> = if config.blacklist_enabled {
        Some(db.clone() as Arc<dyn BlacklistStore>)
    } else {
        info!("Blacklist check disabled.");
        None
    };

    let ctx = Context::new(Arc::clone(&http), bot_user.id, infractions, blacklist);

    // Declare which intents the bot has
    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::ONE, config.discord_token, intents);

    info!("Ryujin is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!(bot_user_id = bot_user.id.get(), "Ryujin has successfully awoken!");
            }
            Event::MessageCreate(msg) => {
                if let Err(source) = handle_message(ctx.clone(), msg).await {
                    error!(?source, "message handling failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(()) // Return Success, shutdown cleanly
}
