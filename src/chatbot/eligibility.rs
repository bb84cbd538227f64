//! Decides whether an inbound message gets an AI reply.

use poise::serenity_prelude::UserId;

/// Returns true when the bot is mentioned in a message it did not write
/// and the message is not a prefixed command.
#[must_use]
pub fn should_respond<I>(
    author_id: UserId,
    bot_user_id: UserId,
    mentions: I,
    content: &str,
    command_prefix: &str,
) -> bool
where
    I: IntoIterator<Item = UserId>,
{
    if author_id == bot_user_id {
        return false;
    }

    mentions.into_iter().any(|id| id == bot_user_id) && !content.starts_with(command_prefix)
}
