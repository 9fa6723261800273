//! Text processing utilities: word counting and size-bounded chunking
//!
//! Summarization models have input limits, so long material is split into
//! chunks of roughly `chunk_size` characters before being sent to the
//! backend. Chunk boundaries always fall between words; joining the chunks
//! back together with single spaces reproduces the whitespace-normalized
//! input.

/// Default chunk size budget in characters
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Count whitespace-delimited words in a text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text into chunks of roughly `chunk_size` characters.
///
/// Words are accumulated left to right; the accumulated size counts each
/// word's length plus one separator character. A chunk is closed as soon as
/// the accumulated size reaches the budget, so a single word longer than
/// the budget still occupies its own chunk. The trailing partial chunk is
/// emitted even when under budget.
///
/// Empty (or whitespace-only) input yields no chunks.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_size = 0usize;

    for word in text.split_whitespace() {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        current_size += word.len() + 1;

        if current_size >= chunk_size {
            chunks.push(std::mem::take(&mut current));
            current_size = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
