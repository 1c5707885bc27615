//! Fixed-size transcript chunker.
//!
//! Splits a transcript into contiguous slices of `chunk_size` characters
//! before summarization and question generation. Boundaries are character
//! counts only — a chunk may cut a word or sentence mid-way. That is an
//! accepted quality limitation of the pipeline, not something to repair here.

/// Split `text` into contiguous chunks of at most `chunk_size` characters.
///
/// Chunks preserve character order, never overlap, and together reproduce
/// `text` exactly. Every chunk except possibly the last contains exactly
/// `chunk_size` characters. Empty input yields no chunks.
///
/// Boundaries are counted in characters, not bytes, so multi-byte UTF-8
/// sequences are never split.
///
/// # Panics
/// Panics if `chunk_size` is zero.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut current = String::with_capacity(chunk_size);
    let mut count = 0usize;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == chunk_size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Number of chunks `chunk_text` produces for a text of `char_count` characters.
pub fn chunk_count(char_count: usize, chunk_size: usize) -> usize {
    assert!(chunk_size > 0, "chunk_size must be positive");
    char_count.div_ceil(chunk_size)
}
