//! Poise command for the snow check.

use log::{error, info, warn};

use crate::bot::Data;
use crate::error::{BotError, Result};

use super::check::{Announcer, run_snowcheck};

/// Context type for snow commands.
type Context<'a> = poise::Context<'a, Data, BotError>;

const ANNOUNCEMENT: &str = "I'll check the snow reports for Brian Head and Lee Canyon...";

/// Posts progress notices to the invoking channel, best effort.
struct ChannelAnnouncer<'a> {
    ctx: Context<'a>,
}

impl Announcer for ChannelAnnouncer<'_> {
    async fn announce(&self, text: &str) {
        if let Err(e) = self.ctx.say(text).await {
            warn!("Failed to post snow check notice: {e}");
        }
    }
}

/// Compare today's snow at Brian Head and Lee Canyon.
#[poise::command(prefix_command, slash_command)]
pub async fn snowcheck(ctx: Context<'_>) -> Result<()> {
    ctx.say(ANNOUNCEMENT).await?;

    // One browser at a time.
    let _guard = ctx.data().snowcheck_lock().lock().await;
    info!("Snow check requested by {}", ctx.author().tag());

    let announcer = ChannelAnnouncer { ctx };
    match run_snowcheck(ctx.data().browser(), &announcer).await {
        Ok(report) => {
            ctx.say(report).await?;
        }
        Err(e) => {
            error!("Snow scraping failed ({:?}): {e:?}", e.category());
            ctx.say(format!("❌ Error while scraping: {e}")).await?;
        }
    }

    Ok(())
}
