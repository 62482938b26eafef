use std::sync::Arc;

use ::serenity::all::ClientBuilder;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use songbird::SerenityInit;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ducktales::commands::music::audio_sources::YtDlpResolver;
use ducktales::commands::music::utils::music_manager::MusicManager;
use ducktales::config::Config;
use ducktales::{Data, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ducktales=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::from_env()?;
    info!("Starting with {:?}", config);

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let token = config.discord_token.clone();
    let prefix = config.command_prefix.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: ducktales::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            on_error: |error| {
                Box::pin(async move {
                    if let Err(e) = poise::builtins::on_error(error).await {
                        error!("Error while handling error: {}", e);
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, _framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                ctx.set_activity(Some(serenity::ActivityData::listening(format!(
                    "{}play",
                    config.command_prefix
                ))));

                let http_client = reqwest::Client::new();
                Ok(Data {
                    music: MusicManager::new(http_client, &config),
                    resolver: Arc::new(YtDlpResolver::new(config.ytdlp_path.clone())),
                    config,
                })
            })
        });

    let client_builder = ClientBuilder::new(token, intents).framework(framework.build());

    let mut client = client_builder.register_songbird().await?;
    client.start().await.map_err(Into::into)
}
