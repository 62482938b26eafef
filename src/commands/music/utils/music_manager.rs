use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId};
use songbird::Songbird;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::player::{Player, PlayerEvent};
use super::songbird_player::SongbirdPlayer;
use super::track_scheduler::TrackScheduler;
use crate::config::Config;

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to join voice channel: {0}")]
    JoinError(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("User is not in a voice channel")]
    UserNotInVoiceChannel,
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Everything that belongs to the bot being in one guild's voice channel.
pub struct MusicSession {
    pub scheduler: Arc<TrackScheduler>,
    event_loop: JoinHandle<()>,
}

impl MusicSession {
    fn start(
        player: Arc<dyn Player>,
        events: UnboundedReceiver<PlayerEvent>,
        chunk_limit: usize,
    ) -> Self {
        let scheduler = Arc::new(TrackScheduler::new(player, chunk_limit));
        let event_loop = scheduler.clone().spawn_event_loop(events);

        Self {
            scheduler,
            event_loop,
        }
    }
}

impl Drop for MusicSession {
    fn drop(&mut self) {
        self.event_loop.abort();
    }
}

/// Keeps one [`MusicSession`] per guild the bot is connected in
pub struct MusicManager {
    sessions: DashMap<GuildId, Arc<MusicSession>>,
    http_client: reqwest::Client,
    chunk_limit: usize,
    stuck_threshold: Duration,
}

impl MusicManager {
    pub fn new(http_client: reqwest::Client, config: &Config) -> Self {
        Self {
            sessions: DashMap::new(),
            http_client,
            chunk_limit: config.message_chunk_limit,
            stuck_threshold: config.stuck_threshold,
        }
    }

    /// Get the Songbird voice client from the context
    pub async fn get_songbird(ctx: &Context) -> MusicResult<Arc<Songbird>> {
        songbird::get(ctx).await.ok_or(MusicError::NoVoiceManager)
    }

    /// The session of a guild, if the bot is connected there
    pub fn session(&self, guild_id: GuildId) -> Option<Arc<MusicSession>> {
        self.sessions
            .get(&guild_id)
            .map(|session| session.value().clone())
    }

    /// Connect to `channel_id`, reusing the guild's session if there is one
    pub async fn join(
        &self,
        ctx: &Context,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Arc<MusicSession>> {
        let songbird = Self::get_songbird(ctx).await?;

        let already_there = match songbird.get(guild_id) {
            Some(call) => {
                call.lock().await.current_channel() == Some(songbird::id::ChannelId::from(channel_id))
            }
            None => false,
        };

        let call = if already_there {
            debug!("Already in voice channel {} of guild {}", channel_id, guild_id);
            songbird.get(guild_id).ok_or(MusicError::NotConnected)?
        } else {
            info!("Joining voice channel {} of guild {}", channel_id, guild_id);
            songbird.join(guild_id, channel_id).await.map_err(|e| {
                error!(
                    "Failed to join voice channel {} for guild {}: {}",
                    channel_id, guild_id, e
                );
                MusicError::JoinError(e.to_string())
            })?
        };

        let session = self
            .sessions
            .entry(guild_id)
            .or_insert_with(|| {
                info!("Creating music session for guild {}", guild_id);
                let (events_tx, events_rx) = mpsc::unbounded_channel();
                let player = SongbirdPlayer::new(
                    call,
                    self.http_client.clone(),
                    events_tx,
                    self.stuck_threshold,
                );
                Arc::new(MusicSession::start(
                    Arc::new(player),
                    events_rx,
                    self.chunk_limit,
                ))
            })
            .value()
            .clone();

        Ok(session)
    }

    /// Leave the guild's voice channel and forget its session
    pub async fn leave(&self, ctx: &Context, guild_id: GuildId) -> MusicResult<()> {
        let songbird = Self::get_songbird(ctx).await?;

        self.forget(guild_id);

        // Check if we're in a voice channel
        if songbird.get(guild_id).is_none() {
            return Err(MusicError::NotConnected);
        }

        songbird
            .remove(guild_id)
            .await
            .map_err(|_| MusicError::JoinError("Failed to leave voice channel".to_string()))?;

        info!("Left voice channel of guild {}", guild_id);
        Ok(())
    }

    /// Drop the guild's session along with its queue. Returns false if there
    /// was none.
    fn forget(&self, guild_id: GuildId) -> bool {
        let removed = self.sessions.remove(&guild_id).is_some();
        if removed {
            debug!("Dropped music session of guild {}", guild_id);
        }
        removed
    }

    /// Get the voice channel ID that the user is currently in
    pub fn get_user_voice_channel(
        ctx: &Context,
        guild_id: GuildId,
        user_id: serenity::UserId,
    ) -> MusicResult<ChannelId> {
        // Get the guild
        let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

        // Get the voice state of the user
        let voice_state = guild
            .voice_states
            .get(&user_id)
            .ok_or(MusicError::UserNotInVoiceChannel)?;

        voice_state
            .channel_id
            .ok_or(MusicError::UserNotInVoiceChannel)
    }
}
