//! Where scheduler notifications go, and how long ones are cut up so they fit
//! into a single chat message.

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use serenity::model::id::ChannelId;
use tracing::warn;

/// Prefix put in front of every chunk sent to a channel.
pub const MSG_PREFIX: &str = "```";
/// Postfix put behind every chunk sent to a channel.
pub const MSG_POSTFIX: &str = "```";

/// A destination for user-visible notifications. Sending is best effort and
/// must not block the caller.
pub trait OutputSink: Send + Sync {
    fn send(&self, text: String);
}

/// Sends notifications to a guild text channel.
pub struct ChannelSink {
    http: Arc<serenity::Http>,
    channel_id: ChannelId,
}

impl ChannelSink {
    pub fn new(http: Arc<serenity::Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

impl OutputSink for ChannelSink {
    fn send(&self, text: String) {
        let http = self.http.clone();
        let channel_id = self.channel_id;

        tokio::spawn(async move {
            if let Err(e) = channel_id.say(&*http, text).await {
                warn!("Failed to send message to channel {}: {}", channel_id, e);
            }
        });
    }
}

/// Wrap a chunk in the code-block markers.
pub fn wrap(chunk: &str) -> String {
    format!("{}{}{}", MSG_PREFIX, chunk, MSG_POSTFIX)
}

/// Split `text` into chunks of at most `limit` characters.
///
/// A chunk ends after the last newline inside the window if that keeps it at
/// least half full; otherwise it is cut at exactly `limit` characters.
/// Concatenating the chunks gives back `text`.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        // Byte offset just past the `limit`-th char, or the whole rest.
        let window_end = rest
            .char_indices()
            .nth(limit)
            .map(|(offset, _)| offset)
            .unwrap_or(rest.len());

        if window_end == rest.len() {
            chunks.push(rest);
            break;
        }

        let window = &rest[..window_end];
        let cut = match window.rfind('\n') {
            Some(newline) if window[..=newline].chars().count() * 2 >= limit => newline + 1,
            _ => window_end,
        };

        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }

    chunks
}
