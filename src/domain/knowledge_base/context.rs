//! Context assembly for RAG prompting
//!
//! Packs ranked search hits into a single token-bounded text blob. The token
//! cost of a block is estimated at four characters per token; this is a
//! heuristic, not tied to any tokenizer, so the budget is approximate with
//! respect to a downstream model's real tokenization.

use super::document::Document;
use super::hit::SearchHit;

/// Characters-per-token estimate used for the context budget
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token cost of a piece of text
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / CHARS_PER_TOKEN
}

/// Render a document as a context block
pub fn format_block(document: &Document) -> String {
    format!("## {}\n{}\n", document.title, document.content)
}

/// Greedily pack hits into a context string, in rank order, without exceeding
/// `max_tokens`.
///
/// A block is included whole or not at all; packing stops before the first
/// block that would overflow the budget. Returns an empty string when nothing
/// fits.
pub fn assemble(hits: &[SearchHit], max_tokens: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current_tokens = 0;

    for hit in hits {
        let block = format_block(&hit.document);
        let estimated = estimate_tokens(&block);

        if current_tokens + estimated > max_tokens {
            break;
        }

        parts.push(block);
        current_tokens += estimated;
    }

    parts.join("\n")
}
