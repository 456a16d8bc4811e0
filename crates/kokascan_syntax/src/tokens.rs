//! Token and span types shared by the scanner and its hosts.

use crate::symbols::Symbol;

/// Byte range in the source text, `start..end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Zero-width spans mark synthetic tokens that consume no source text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An external token with its symbol and source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: Symbol,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: Symbol, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether this token was inserted by the layout rule rather than read from the source.
    pub fn is_synthetic(&self) -> bool {
        self.span.is_empty() && self.kind != Symbol::RawString
    }
}
