use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod services;

use api::nasdaq::NasdaqClient;
use config::BotConfig;

struct Handler;

/// Shared quote API client, stored in the serenity TypeMap.
struct QuoteClient;

impl TypeMapKey for QuoteClient {
    type Value = NasdaqClient;
}

struct BotSettings;

impl TypeMapKey for BotSettings {
    type Value = BotConfig;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("trendcast=debug".parse().expect("valid directive"))
                .add_directive("serenity=warn".parse().expect("valid directive")),
        )
        .with_target(true)
        .init();

    info!("Starting trendcast bot...");

    let config = match BotConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            return;
        }
    };

    let quote_client = match &config.quote_api_base {
        Some(base) => NasdaqClient::with_base_url(base.clone()),
        None => NasdaqClient::new(),
    };

    let token = config.discord_token.clone();
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGES;

    let mut client = match Client::builder(&token, intents).event_handler(Handler).await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create client: {}", e);
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<QuoteClient>(quote_client);
        data.insert::<BotSettings>(config);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
