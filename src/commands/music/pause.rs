use super::*;

/// Pause the audio player
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        session.scheduler.pause().await;
    }
    Ok(())
}
