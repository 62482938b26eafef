use super::*;

/// Play the last finished track again
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn repeat(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        if !session.scheduler.repeat_last().await {
            reply(ctx, messages::nothing_to_repeat()).await?;
        }
    }
    Ok(())
}
