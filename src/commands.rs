//! Prefix and slash commands.

use poise::serenity_prelude::Mentionable;

use crate::bot::Data;
use crate::error::{BotError, Result};
use crate::snow::snowcheck;

/// Context type for general commands.
type Context<'a> = poise::Context<'a, Data, BotError>;

/// Say hello.
#[poise::command(prefix_command, slash_command)]
pub async fn hello(ctx: Context<'_>) -> Result<()> {
    ctx.say(format!("Hello {}!", ctx.author().mention())).await?;
    Ok(())
}

/// Get every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<Data, BotError>> {
    vec![hello(), snowcheck()]
}
