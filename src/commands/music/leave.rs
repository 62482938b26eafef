use super::*;

/// Clear the queue and leave the voice channel
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn leave(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;

    match ctx.data().music.leave(ctx.serenity_context(), guild_id).await {
        Ok(()) => {
            let server = ctx
                .guild()
                .map(|guild| guild.name.clone())
                .unwrap_or_else(|| guild_id.to_string());
            reply(ctx, messages::left_voice_channel(&server)).await
        }
        Err(MusicError::NotConnected) => reply(ctx, messages::not_in_voice_channel()).await,
        Err(err) => Err(err.into()),
    }
}
