//! # Chunker
//!
//! Splits a reply into pieces of at most `max_chars` characters so each fits in one outgoing
//! message. Lengths are counted in `char`s, so a piece never ends inside a UTF-8 code point.
//!
//! ## Tokens
//!
//! The text is scanned into an ordered token stream with no gaps or overlaps:
//!
//! - **Link**: a markdown link span `[label](url)`, kept whole whenever it fits in one piece.
//! - **Word**: a run of non-whitespace characters.
//! - **Space**: a run of whitespace characters.
//!
//! Tokens are packed greedily. A token longer than `max_chars` is hard-split into consecutive
//! `max_chars` pieces, each emitted as its own chunk. Concatenating the output always yields the
//! input exactly.

use once_cell::sync::Lazy;
use regex::Regex;

mod token;

pub use token::{tokenize, Token, TokenKind};

/// Outgoing message limit for direct chats.
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Outgoing message limit for group chats.
pub const DEFAULT_GROUP_MAX_CHARS: usize = 1024;

/// `[label](url)`; the url may contain one level of balanced parentheses.
pub(crate) static LINK_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]\n]*\]\((?:[^()\s]|\([^()\s]*\))*\)").expect("link span pattern is valid")
});

/// Splits `text` into ordered pieces of at most `max_chars` characters.
///
/// Never returns an empty vector: empty input yields one empty chunk. A `max_chars` of 0 is
/// treated as 1.
pub fn chunk(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for token in tokenize(text) {
        let token_len = token.char_len();

        if current_len + token_len > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if token_len > max_chars {
            tracing::debug!(token_chars = token_len, max_chars, "hard-splitting oversized token");
            chunks.extend(hard_split(token.text, max_chars));
            continue;
        }

        current.push_str(token.text);
        current_len += token_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Cuts `text` into consecutive pieces of exactly `max_chars` characters; the last may be shorter.
fn hard_split(text: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_len = 0usize;
    for c in text.chars() {
        piece.push(c);
        piece_len += 1;
        if piece_len == max_chars {
            pieces.push(std::mem::take(&mut piece));
            piece_len = 0;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_single_empty_chunk() {
        assert_eq!(chunk("", 10), vec![String::new()]);
    }

    #[test]
    fn test_short_input_is_one_chunk() {
        assert_eq!(chunk("hello world", 2000), vec!["hello world".to_string()]);
        assert_eq!(chunk("exact", 5), vec!["exact".to_string()]);
    }

    #[test]
    fn test_zero_max_is_treated_as_one() {
        assert_eq!(chunk("ab", 0), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_hard_split_counts_chars_not_bytes() {
        let pieces = hard_split("äöüß", 3);
        assert_eq!(pieces, vec!["äöü".to_string(), "ß".to_string()]);
    }

    #[test]
    fn test_hard_split_exact_multiple() {
        assert_eq!(hard_split("abcdef", 3), vec!["abc", "def"]);
    }

    #[test]
    fn test_words_are_not_split_when_they_fit() {
        let chunks = chunk("alpha beta gamma", 11);
        assert_eq!(chunks, vec!["alpha beta ", "gamma"]);
    }

    #[test]
    fn test_oversized_word_pieces_are_separate_chunks() {
        let chunks = chunk("ab cdefgh ij", 3);
        assert_eq!(chunks, vec!["ab ", "cde", "fgh", " ij"]);
    }
}
