use super::*;

/// Skip to the next track in the queue
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        session.scheduler.advance().await;
    }
    Ok(())
}
