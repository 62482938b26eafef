use tracing::info;

use crate::commands::music::utils::output_sink::wrap;
use crate::{CommandResult, Context};

/// Disconnect every shard and shut the bot down
#[poise::command(prefix_command, owners_only, hide_in_help, category = "Admin")]
pub async fn logout(ctx: Context<'_>) -> CommandResult {
    info!("Logout requested by {}", ctx.author().name);

    ctx.say(wrap("Logging out")).await?;
    ctx.framework().shard_manager().shutdown_all().await;

    Ok(())
}
