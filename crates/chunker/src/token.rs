//! Token stream used by the chunker.

use crate::LINK_SPAN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Markdown link span `[label](url)`.
    Link,
    /// Run of non-whitespace characters.
    Word,
    /// Run of whitespace characters.
    Space,
}

/// A slice of the input with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits `text` into link spans, then splits the remainder into whitespace and
/// non-whitespace runs. Token texts concatenate back to `text`.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    for m in LINK_SPAN.find_iter(text) {
        push_runs(&text[cursor..m.start()], &mut tokens);
        tokens.push(Token {
            kind: TokenKind::Link,
            text: m.as_str(),
        });
        cursor = m.end();
    }
    push_runs(&text[cursor..], &mut tokens);

    tokens
}

fn push_runs<'a>(segment: &'a str, tokens: &mut Vec<Token<'a>>) {
    let mut run_start = 0usize;
    let mut run_is_space: Option<bool> = None;

    for (idx, c) in segment.char_indices() {
        let is_space = c.is_whitespace();
        match run_is_space {
            Some(prev) if prev != is_space => {
                tokens.push(run_token(&segment[run_start..idx], prev));
                run_start = idx;
            }
            _ => {}
        }
        run_is_space = Some(is_space);
    }

    if let Some(is_space) = run_is_space {
        tokens.push(run_token(&segment[run_start..], is_space));
    }
}

fn run_token(text: &str, is_space: bool) -> Token<'_> {
    Token {
        kind: if is_space {
            TokenKind::Space
        } else {
            TokenKind::Word
        },
        text,
    }
}
