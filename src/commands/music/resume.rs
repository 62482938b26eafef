use super::*;

/// Resume the audio player, or start the next queued track if nothing plays
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        session.scheduler.resume().await;
    }
    Ok(())
}
