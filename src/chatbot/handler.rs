//! Main handler for bot mentions.

use std::future::Future;

use log::{debug, error, info};
use poise::serenity_prelude::{Context, Message as SerenityMessage, UserId};

use crate::bot::Data;
use crate::error::Result;
use crate::openai::OpenAiClient;

use super::conversation::{ConversationWindow, fetch_window};
use super::eligibility::should_respond;
use super::prompt::build_prompt;
use super::response::send_response;

/// Sent to the channel whenever a mention could not be answered.
pub const FAILURE_NOTICE: &str = "⚠️ Sorry, something went wrong.";

/// Produces the model's answer for an assembled prompt.
pub trait Generator: Sync {
    fn respond(&self, input: &str) -> impl Future<Output = Result<String>> + Send;
}

impl Generator for OpenAiClient {
    async fn respond(&self, input: &str) -> Result<String> {
        OpenAiClient::respond(self, input).await
    }
}

/// The channel a mention came from.
pub trait MentionChannel: Sync {
    /// Recent messages, oldest first.
    fn history(&self) -> impl Future<Output = Result<ConversationWindow>> + Send;

    /// Reply to the triggering message.
    fn reply(&self, text: &str) -> impl Future<Output = Result<()>> + Send;

    /// Post a plain message to the channel.
    fn notice(&self, text: &str) -> impl Future<Output = Result<()>> + Send;
}

struct DiscordChannel<'a> {
    ctx: &'a Context,
    message: &'a SerenityMessage,
    bot_user_id: UserId,
}

impl MentionChannel for DiscordChannel<'_> {
    async fn history(&self) -> Result<ConversationWindow> {
        fetch_window(self.ctx, self.message, self.bot_user_id).await
    }

    async fn reply(&self, text: &str) -> Result<()> {
        self.message.reply(&self.ctx.http, text).await?;
        Ok(())
    }

    async fn notice(&self, text: &str) -> Result<()> {
        self.message.channel_id.say(&self.ctx.http, text).await?;
        Ok(())
    }
}

/// Main handler for messages that mention the bot.
///
/// # Errors
///
/// Only fails when the failure notice itself cannot be sent.
pub async fn handle_bot_mention(
    ctx: &Context,
    new_message: &SerenityMessage,
    data: &Data,
    bot_user_id: UserId,
) -> Result<()> {
    if !should_respond(
        new_message.author.id,
        bot_user_id,
        new_message.mentions.iter().map(|user| user.id),
        &new_message.content,
        data.command_prefix(),
    ) {
        return Ok(());
    }

    info!(
        "Received message from {} in channel {}: {}",
        new_message.author.tag(),
        new_message.channel_id,
        new_message.content
    );

    if let Err(e) = new_message.channel_id.broadcast_typing(&ctx.http).await {
        debug!("Failed to broadcast typing indicator: {e}");
    }

    let channel = DiscordChannel {
        ctx,
        message: new_message,
        bot_user_id,
    };
    answer_mention(data.openai_client(), &channel).await
}

/// Answer from recent history, or post [`FAILURE_NOTICE`] once if any step fails.
///
/// # Errors
///
/// Only fails when the failure notice itself cannot be sent.
pub async fn answer_mention<G, C>(generator: &G, channel: &C) -> Result<()>
where
    G: Generator,
    C: MentionChannel,
{
    if let Err(e) = answer(generator, channel).await {
        error!("Error answering mention ({:?}): {e}", e.category());
        channel.notice(FAILURE_NOTICE).await?;
    }
    Ok(())
}

async fn answer<G, C>(generator: &G, channel: &C) -> Result<()>
where
    G: Generator,
    C: MentionChannel,
{
    let window = channel.history().await?;
    debug!("Conversation window has {} messages", window.len());

    let prompt = build_prompt(&window);
    debug!("Combined input for model:\n{prompt}");

    let text = generator.respond(&prompt).await?;
    send_response(channel, &text).await
}
