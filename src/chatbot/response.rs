//! Response sending utilities for Discord.

use log::{info, warn};

use crate::chunking::{DISCORD_CHUNK_LENGTH, chunk_text};
use crate::error::Result;

use super::handler::MentionChannel;

/// Reply with `text`, one message per chunk, in order.
///
/// Stops at the first chunk that fails to send.
///
/// # Errors
///
/// Returns the error of the first chunk that could not be sent.
pub async fn send_response<C: MentionChannel>(channel: &C, text: &str) -> Result<()> {
    let chunks = chunk_text(text, DISCORD_CHUNK_LENGTH);
    if chunks.is_empty() {
        warn!("No response content generated");
        return Ok(());
    }

    for chunk in &chunks {
        channel.reply(chunk).await?;
    }

    info!("Replied with {} message(s): {text}", chunks.len());
    Ok(())
}
