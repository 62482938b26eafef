//! This module aggregates all the command modules for the bot.

/// Commands reserved for the bot owners (e.g., logout).
pub mod admins;
/// General purpose commands (e.g., ping).
pub mod general;
/// Commands related to music playback.
pub mod music;
