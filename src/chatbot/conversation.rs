//! Rolling window of recent channel messages used as model context.

use std::fmt;

use log::debug;
use poise::serenity_prelude::{Context, GetMessages, Message as SerenityMessage, UserId};

use crate::error::Result;

/// Number of recent channel messages handed to the model, including the mention itself.
pub const HISTORY_LIMIT: u8 = 10;

/// Who wrote a message in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// The bot itself
    Bot,
    /// Any other participant
    User(UserId),
}

impl Author {
    #[must_use]
    pub fn of(author_id: UserId, bot_user_id: UserId) -> Self {
        if author_id == bot_user_id {
            Author::Bot
        } else {
            Author::User(author_id)
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::Bot => f.write_str("Past Self"),
            Author::User(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub author: Author,
    pub content: String,
}

/// Recent messages in chronological order, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ConversationWindow {
    entries: Vec<HistoryEntry>,
}

impl ConversationWindow {
    /// Build a window from entries listed newest first, as Discord returns them.
    ///
    /// Keeps at most [`HISTORY_LIMIT`] of the newest entries.
    #[must_use]
    pub fn from_newest_first<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = HistoryEntry>,
    {
        let mut entries: Vec<_> = entries
            .into_iter()
            .take(usize::from(HISTORY_LIMIT))
            .collect();
        entries.reverse();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch the latest messages of the channel `message` was posted in.
///
/// # Errors
///
/// Fails when Discord rejects the history request.
pub async fn fetch_window(
    ctx: &Context,
    message: &SerenityMessage,
    bot_user_id: UserId,
) -> Result<ConversationWindow> {
    let messages = message
        .channel_id
        .messages(&ctx.http, GetMessages::new().limit(HISTORY_LIMIT))
        .await?;

    debug!(
        "Fetched {} messages from channel {}",
        messages.len(),
        message.channel_id
    );

    Ok(ConversationWindow::from_newest_first(
        messages.into_iter().map(|msg| HistoryEntry {
            author: Author::of(msg.author.id, bot_user_id),
            content: msg.content,
        }),
    ))
}
