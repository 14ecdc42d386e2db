#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::{process, sync::Arc};

use serenity::{prelude::GatewayIntents, Client};
use tracing::{error, info};

mod commands;
mod common;
mod events;
mod models;

use models::{config::BotConfig, giveaway::GiveawayManager, handler::Handler};

#[tokio::main]
async fn main() {
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            process::exit(1);
        }
    };
    common::logging::init(&config);

    info!("Getting environment variables");
    let discord_token = config.discord_token.clone();
    if let Some(guild_id) = config.guild_id {
        info!("Commands will be registered in guild {}", guild_id);
    }

    // Discord client connection
    let handler = Handler {
        config: Arc::new(config),
        giveaways: Arc::new(GiveawayManager::new()),
    };
    let intents = GatewayIntents::non_privileged();
    let mut client = match Client::builder(&discord_token, intents)
        .event_handler(handler)
        .await
    {
        Ok(client) => client,
        Err(err) => {
            error!("Could not create the Discord client: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = client.start().await {
        error!(
            "Attempted to start the giveaway Discord client, but failed with error: {}",
            err
        );
    }
}
