use std::sync::Arc;

pub mod commands;
pub mod config;

use commands::music::audio_sources::TrackResolver;
use commands::music::utils::music_manager::MusicManager;
use config::Config;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub config: Config,
    pub music: MusicManager,
    pub resolver: Arc<dyn TrackResolver>,
}

/// Show the list of commands, or help about a specific one
#[poise::command(prefix_command, category = "General")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Specific command to show help about"] command: Option<String>,
) -> CommandResult {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        poise::builtins::HelpConfiguration {
            show_context_menu_commands: true,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| e.into())
}

#[poise::command(prefix_command, hide_in_help)]
pub async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx)
        .await
        .map_err(|e| e.into())
}

/// Every command the bot answers to.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    use commands::{
        admins::logout::*,
        general::ping::*,
        music::{
            clear::*, join::*, leave::*, list::*, loop_track::*, pause::*, play::*, repeat::*,
            resume::*, search::*, skip::*, stop::*,
        },
    };

    vec![
        // Default commands
        register(),
        help(),
        // General commands
        ping(),
        // Admin commands
        logout(),
        // Music commands
        join(),
        play(),
        search(),
        list(),
        stop(),
        pause(),
        resume(),
        skip(),
        clear(),
        loop_track(),
        unloop(),
        repeat(),
        leave(),
    ]
}
