use super::*;

/// Keep replaying the current track
#[poise::command(prefix_command, guild_only, rename = "loop", category = "Music")]
pub async fn loop_track(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        session.scheduler.loop_on().await;
    }
    Ok(())
}

/// Stop replaying the looped track
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn unloop(ctx: Context<'_>) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        session.scheduler.loop_off().await;
    }
    Ok(())
}
