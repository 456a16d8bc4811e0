//! The host-side cursor the scanner reads through.
//!
//! The scanner never sees the source directly. It peeks one code point at a time, moves forward either
//! *advancing* (the character becomes part of the token) or *skipping* (the character is leading trivia), and
//! pins the committed token end with `mark_end`. Anything read past the last `mark_end` is speculative lookahead:
//! the host discards it when the token is committed, and discards everything when the scan fails.

use crate::tokens::Span;

/// Pull-based view of the source at the scanner's current decision point.
pub trait Cursor {
    /// Code point under the cursor, `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Move past the lookahead, including it in the token. No-op at end of input.
    fn advance(&mut self);

    /// Move past the lookahead as leading trivia; the token starts after it. No-op at end of input.
    fn skip(&mut self);

    /// Commit the current position as the token end.
    fn mark_end(&mut self);

    /// Zero-based column (in code points) of the lookahead.
    fn column(&self) -> u32;

    fn is_eof(&self) -> bool {
        self.lookahead().is_none()
    }
}

/// [`Cursor`] over an in-memory source string with explicit commit/rollback.
///
/// ## Notes
/// - Call [`SourceCursor::begin`] before each scan attempt, then [`SourceCursor::commit`] on success or
///   [`SourceCursor::rollback`] on failure.
/// - When no `mark_end` happened the token extends to the lookahead position.
/// - A token whose end was marked before skipped trivia collapses to a zero-width span at that end.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    source: &'a str,
    /// Offset the current attempt started from.
    origin: usize,
    token_start: usize,
    pos: usize,
    marked_end: Option<usize>,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// Cursor positioned at `offset`, which must lie on a character boundary.
    pub fn at(source: &'a str, offset: usize) -> Self {
        debug_assert!(source.is_char_boundary(offset), "offset {offset} splits a character");
        Self {
            source,
            origin: offset,
            token_start: offset,
            pos: offset,
            marked_end: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of the lookahead.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Unread remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Start a scan attempt at the current offset.
    pub fn begin(&mut self) {
        self.origin = self.pos;
        self.token_start = self.pos;
        self.marked_end = None;
    }

    /// Accept the attempt: return the token span and move to its end.
    pub fn commit(&mut self) -> Span {
        let end = self.marked_end.unwrap_or(self.pos);
        let start = self.token_start.min(end);
        self.pos = end;
        self.begin();
        Span::new(start, end)
    }

    /// Reject the attempt: forget every character read since [`SourceCursor::begin`].
    pub fn rollback(&mut self) {
        self.pos = self.origin;
        self.begin();
    }

    /// Skip whitespace (including newlines) outside any attempt, the way a host skips extras.
    pub fn skip_whitespace(&mut self) {
        while self.lookahead().is_some_and(char::is_whitespace) {
            self.skip();
        }
        self.begin();
    }
}

impl Cursor for SourceCursor<'_> {
    fn lookahead(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.lookahead() {
            self.pos += c.len_utf8();
        }
    }

    fn skip(&mut self) {
        self.advance();
        self.token_start = self.pos;
    }

    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }

    fn column(&self) -> u32 {
        let line_start = self.source[..self.pos].rfind('\n').map_or(0, |i| i + 1);
        let width = self.source[line_start..self.pos].chars().count();
        u32::try_from(width).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_uses_marked_end_not_lookahead() {
        let mut cursor = SourceCursor::new("abc def");
        cursor.begin();
        cursor.advance();
        cursor.advance();
        cursor.mark_end();
        cursor.advance();
        assert_eq!(cursor.commit(), Span::new(0, 2));
        assert_eq!(cursor.lookahead(), Some('c'));
    }

    #[test]
    fn test_commit_without_mark_extends_to_lookahead() {
        let mut cursor = SourceCursor::new("abc");
        cursor.begin();
        cursor.advance();
        assert_eq!(cursor.commit(), Span::new(0, 1));
    }

    #[test]
    fn test_skipped_trivia_is_not_part_of_token() {
        let mut cursor = SourceCursor::new("  \n  x");
        cursor.begin();
        while cursor.lookahead().is_some_and(char::is_whitespace) {
            cursor.skip();
        }
        cursor.mark_end();
        let span = cursor.commit();
        assert_eq!(span, Span::empty(5));
        assert_eq!(cursor.lookahead(), Some('x'));
    }

    #[test]
    fn test_end_marked_before_trivia_collapses_to_zero_width() {
        let mut cursor = SourceCursor::new("  x");
        cursor.begin();
        cursor.mark_end();
        cursor.skip();
        cursor.skip();
        assert_eq!(cursor.commit(), Span::empty(0));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_rollback_restores_origin() {
        let mut cursor = SourceCursor::at("xx then", 3);
        cursor.begin();
        for _ in 0..4 {
            cursor.advance();
        }
        cursor.mark_end();
        cursor.rollback();
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.rest(), "then");
    }

    #[test]
    fn test_column_counts_code_points_on_current_line() {
        let mut cursor = SourceCursor::new("ab\nλμ x");
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.lookahead(), Some(' '));
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn test_advance_at_eof_is_noop() {
        let mut cursor = SourceCursor::new("a");
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_skip_whitespace_crosses_newlines() {
        let mut cursor = SourceCursor::new(" \n\t y");
        cursor.skip_whitespace();
        assert_eq!(cursor.lookahead(), Some('y'));
        cursor.rollback();
        assert_eq!(cursor.lookahead(), Some('y'));
    }
}
