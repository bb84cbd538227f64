//! AI chatbot module - answers messages that mention the bot.

mod conversation;
mod eligibility;
mod handler;
mod prompt;
mod response;

pub use conversation::{Author, ConversationWindow, HISTORY_LIMIT, HistoryEntry};
pub use eligibility::should_respond;
pub use handler::{FAILURE_NOTICE, Generator, MentionChannel, answer_mention, handle_bot_mention};
pub use prompt::{SYSTEM_PROMPT, build_prompt};
