//! Start-up configuration read from the environment (and `.env` via `dotenv`).

use std::fmt;
use std::time::Duration;

use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "#";
pub const DEFAULT_CHUNK_LIMIT: usize = 1000;
pub const DEFAULT_LIST_COUNT: usize = 10;
pub const DEFAULT_STUCK_THRESHOLD: Duration = Duration::from_secs(10);
pub const DEFAULT_YTDLP_PATH: &str = "yt-dlp";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} not specified in env")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub command_prefix: String,
    /// Max characters per notification chunk, never zero.
    pub message_chunk_limit: usize,
    pub default_list_count: usize,
    pub stuck_threshold: Duration,
    pub ytdlp_path: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("command_prefix", &self.command_prefix)
            .field("message_chunk_limit", &self.message_chunk_limit)
            .field("default_list_count", &self.default_list_count)
            .field("stuck_threshold", &self.stuck_threshold)
            .field("ytdlp_path", &self.ytdlp_path)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let message_chunk_limit = match lookup("MESSAGE_CHUNK_LIMIT") {
            Some(raw) => parse_count("MESSAGE_CHUNK_LIMIT", &raw)?,
            None => DEFAULT_CHUNK_LIMIT,
        };
        if message_chunk_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "MESSAGE_CHUNK_LIMIT",
                value: message_chunk_limit.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let default_list_count = match lookup("DEFAULT_LIST_COUNT") {
            Some(raw) => parse_count("DEFAULT_LIST_COUNT", &raw)?,
            None => DEFAULT_LIST_COUNT,
        };

        let stuck_threshold = match lookup("TRACK_STUCK_THRESHOLD") {
            Some(raw) => parse_duration("TRACK_STUCK_THRESHOLD", &raw)?,
            None => DEFAULT_STUCK_THRESHOLD,
        };

        Ok(Self {
            discord_token,
            command_prefix: lookup("COMMAND_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            message_chunk_limit,
            default_list_count,
            stuck_threshold,
            ytdlp_path: lookup("YTDLP_PATH").unwrap_or_else(|| DEFAULT_YTDLP_PATH.to_string()),
        })
    }
}

fn parse_count(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_duration(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let deserializer: StrDeserializer<'_, ValueError> = raw.trim().into_deserializer();
    humantime_serde::deserialize(deserializer).map_err(|e: ValueError| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
