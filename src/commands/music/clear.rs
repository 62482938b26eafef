use super::*;

/// Remove every track from the queue
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn clear(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        session.scheduler.clear().await;
    }
    Ok(())
}
