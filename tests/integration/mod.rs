//! Scheduler scenarios driven through the fake player.

mod loading;
mod notifications;
