//! Positional text splitting for size-limited Discord messages.

/// Chunk length used for replies, leaving headroom under Discord's 2000 character cap.
pub const DISCORD_CHUNK_LENGTH: usize = 1500;

/// Split `text` into consecutive pieces of at most `max_length` characters.
///
/// Boundaries are purely positional and may fall mid-word. Every chunk but
/// the last holds exactly `max_length` characters; empty text yields no chunks.
#[must_use]
pub fn chunk_text(text: &str, max_length: usize) -> Vec<&str> {
    let max_length = max_length.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_length {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
