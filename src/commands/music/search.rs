use super::*;
use crate::commands::music::audio_sources::AudioSource;

/// Search YouTube and queue the first result
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn search(
    ctx: Context<'_>,
    #[rest]
    #[description = "Search query"]
    query: String,
) -> CommandResult {
    info!("Received search command with query: {}", query);
    load_and_queue(ctx, AudioSource::search_identifier(&query)).await
}
