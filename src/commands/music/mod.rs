pub mod clear;
pub mod join;
pub mod leave;
pub mod list;
pub mod loop_track;
pub mod pause;
pub mod play;
pub mod repeat;
pub mod resume;
pub mod search;
pub mod skip;
pub mod stop;

pub mod audio_sources;
pub mod utils;

use std::sync::Arc;

use poise::serenity_prelude::ChannelId;
use tracing::{debug, error, info};

use crate::{CommandResult, Context, Error};
use utils::messages;
use utils::music_manager::{MusicError, MusicManager, MusicSession};
use utils::output_sink::{self, ChannelSink};

/// Send `text` to the invoking channel, formatted like scheduler notifications.
async fn reply(ctx: Context<'_>, text: String) -> CommandResult {
    ctx.say(output_sink::wrap(&text)).await?;
    Ok(())
}

/// Point the session's notifications at the channel the command came from.
async fn bind_output(ctx: Context<'_>, session: &MusicSession) {
    let sink = ChannelSink::new(ctx.serenity_context().http.clone(), ctx.channel_id());
    session.scheduler.set_output(Arc::new(sink)).await;
}

/// The session of the invoking guild, or `None` after telling the user the
/// bot is not connected there.
async fn current_session(ctx: Context<'_>) -> Result<Option<Arc<MusicSession>>, Error> {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;

    match ctx.data().music.session(guild_id) {
        Some(session) => {
            bind_output(ctx, &session).await;
            Ok(Some(session))
        }
        None => {
            debug!("No music session in guild {}", guild_id);
            reply(ctx, messages::not_in_voice_channel()).await?;
            Ok(None)
        }
    }
}

/// Join the voice channel of the command author, creating the session if
/// needed.
async fn join_author(ctx: Context<'_>) -> Result<Option<(Arc<MusicSession>, ChannelId)>, Error> {
    let guild_id = ctx.guild_id().ok_or(MusicError::NotInGuild)?;

    let channel_id =
        match MusicManager::get_user_voice_channel(ctx.serenity_context(), guild_id, ctx.author().id) {
            Ok(channel_id) => channel_id,
            Err(err) => {
                debug!("Cannot join for {}: {}", ctx.author().name, err);
                reply(ctx, messages::user_not_in_voice_channel()).await?;
                return Ok(None);
            }
        };

    match ctx
        .data()
        .music
        .join(ctx.serenity_context(), guild_id, channel_id)
        .await
    {
        Ok(session) => {
            bind_output(ctx, &session).await;
            Ok(Some((session, channel_id)))
        }
        Err(err) => {
            error!("Failed to join voice channel {}: {}", channel_id, err);
            reply(ctx, messages::failed_to_join(&err.to_string())).await?;
            Ok(None)
        }
    }
}

/// Resolve `identifier` and hand the result to the session's scheduler.
async fn load_and_queue(ctx: Context<'_>, identifier: String) -> CommandResult {
    let Some((session, _)) = join_author(ctx).await? else {
        return Ok(());
    };

    // Resolving can take a few seconds
    ctx.defer_or_broadcast().await?;

    info!("Loading {} for {}", identifier, ctx.author().name);
    let result = ctx
        .data()
        .resolver
        .load(&identifier, &ctx.author().name)
        .await;

    session.scheduler.handle_load_result(result).await;

    Ok(())
}
