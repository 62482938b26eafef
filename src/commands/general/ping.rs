use poise::serenity_prelude as serenity;
use std::time::Duration;

use crate::commands::music::utils::output_sink::wrap;
use crate::{CommandResult, Context};

/// Ping the bot to check its latency
#[poise::command(prefix_command, category = "General")]
pub async fn ping(ctx: Context<'_>) -> CommandResult {
    let latency = get_shard_latency(&ctx)
        .await
        .map(|latency| format!("{} ms", latency.as_millis()))
        .unwrap_or_else(|| "unknown".to_string());

    ctx.say(wrap(&format!("Pong! API Latency: {}", latency)))
        .await?;

    Ok(())
}

async fn get_shard_latency(ctx: &Context<'_>) -> Option<Duration> {
    // The shard manager is an interface for mutating, stopping, restarting, and
    // retrieving information about shards.
    let shard_manager = ctx.framework().shard_manager();

    let runners = shard_manager.runners.lock().await;

    // Shards are backed by a "shard runner" responsible for processing events
    // over the shard, so we'll get the information about the shard runner for
    // the shard this command was sent over.
    let runner = runners.get(&serenity::ShardId(ctx.serenity_context().shard_id.0))?;

    runner.latency
}
