//! Continuation detection for line heads.

use kokascan_core::lang::continuation::{self, CONTINUATION_KEYWORDS, LeadCertainty};

use crate::cursor::Cursor;

/// Longest keyword in [`CONTINUATION_KEYWORDS`].
const KEYWORD_LEN: usize = 4;

/// What the first character of a line says about continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LineLead {
    Statement,
    Continuation,
    /// Decided on first use; resolution reads past the line head.
    Ambiguous { resolved: Option<bool> },
}

impl LineLead {
    pub(super) fn classify(lookahead: Option<char>) -> Self {
        match lookahead.and_then(continuation::lead_certainty) {
            None => LineLead::Statement,
            Some(LeadCertainty::Immediate) => LineLead::Continuation,
            Some(LeadCertainty::Ambiguous) => LineLead::Ambiguous { resolved: None },
        }
    }

    pub(super) fn is_immediate(&self) -> bool {
        matches!(self, LineLead::Continuation)
    }

    pub(super) fn is_ambiguous(&self) -> bool {
        matches!(self, LineLead::Ambiguous { .. })
    }

    /// Whether the line continues the previous statement.
    ///
    /// The first call on an ambiguous lead advances the cursor; later calls reuse the answer.
    pub(super) fn continues<C: Cursor + ?Sized>(&mut self, cursor: &mut C) -> bool {
        match self {
            LineLead::Statement => false,
            LineLead::Continuation => true,
            LineLead::Ambiguous { resolved: Some(answer) } => *answer,
            LineLead::Ambiguous { resolved } => {
                let answer = resolve_ambiguous(cursor);
                *resolved = Some(answer);
                answer
            }
        }
    }
}

fn resolve_ambiguous<C: Cursor + ?Sized>(cursor: &mut C) -> bool {
    match cursor.lookahead() {
        Some('>') => {
            cursor.advance();
            match cursor.lookahead() {
                Some('>') => false,
                Some('|') => {
                    cursor.advance();
                    cursor.lookahead() != Some('<')
                }
                _ => true,
            }
        }
        Some('<') => {
            cursor.advance();
            cursor.lookahead() != Some('<')
        }
        Some('t' | 'e') => starts_with_keyword(cursor),
        _ => false,
    }
}

/// `then`, `else` or `elif` followed by a non-word character (or end of input).
fn starts_with_keyword<C: Cursor + ?Sized>(cursor: &mut C) -> bool {
    let mut word = [0u8; KEYWORD_LEN];
    for slot in &mut word {
        match cursor.lookahead() {
            Some(c) if c.is_ascii() => {
                *slot = c as u8;
                cursor.advance();
            }
            _ => return false,
        }
    }

    let matched = CONTINUATION_KEYWORDS.iter().any(|kw| kw.as_bytes() == &word[..]);
    matched && !cursor.lookahead().is_some_and(continuation::is_word_char)
}
