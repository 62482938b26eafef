use super::*;

/// Stop the current track, keeping the queue
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        session.scheduler.stop().await;
    }
    Ok(())
}
