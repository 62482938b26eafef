use super::*;
use crate::commands::music::audio_sources::AudioSource;

/// Play a URL, or the first search result for anything else
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[rest]
    #[description = "URL or search query"]
    query: String,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    load_and_queue(ctx, AudioSource::identifier_for(&query)).await
}
