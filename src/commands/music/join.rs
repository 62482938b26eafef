use super::*;

/// Join your voice channel
#[poise::command(prefix_command, guild_only, category = "Music")]
pub async fn join(ctx: Context<'_>) -> CommandResult {
    let Some((_, channel_id)) = join_author(ctx).await? else {
        return Ok(());
    };

    let channel_name = ctx
        .guild()
        .and_then(|guild| guild.channels.get(&channel_id).map(|channel| channel.name.clone()))
        .unwrap_or_else(|| channel_id.to_string());

    reply(ctx, messages::joined_voice_channel(&channel_name)).await
}
