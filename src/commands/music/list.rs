use super::*;

/// Show the current track and the upcoming queue
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn list(
    ctx: Context<'_>,
    #[description = "Number of upcoming tracks to show"] count: Option<usize>,
) -> CommandResult {
    if let Some(session) = current_session(ctx).await? {
        let count = count.unwrap_or(ctx.data().config.default_list_count);
        session.scheduler.show_queue(count).await;
    }
    Ok(())
}
