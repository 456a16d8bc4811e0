//! Scanner state carried between calls: the layout stack plus the pending-emission queue.

use crate::diagnostics::ScanError;
use crate::layout::{IndentLevel, LayoutStack};
use crate::symbols::Symbol;

/// Synthetic tokens owed to the host.
///
/// A dedent across `k` blocks needs `k` closing braces, each followed by a statement separator, but the host takes
/// one token per call. The queue drains one entry per call, braces first on ties, so the run reads
/// `} ; } ; … } ;`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PendingEmission {
    close_braces: u32,
    semicolons: u32,
    /// Drop the last semicolon of the run: the dedented line continues the enclosing statement.
    suppress_final_semicolon: bool,
}

impl PendingEmission {
    pub fn new(close_braces: u32, semicolons: u32, suppress_final_semicolon: bool) -> Self {
        Self {
            close_braces,
            semicolons,
            suppress_final_semicolon,
        }
    }

    pub fn close_braces(&self) -> u32 {
        self.close_braces
    }

    pub fn semicolons(&self) -> u32 {
        self.semicolons
    }

    pub fn suppress_final_semicolon(&self) -> bool {
        self.suppress_final_semicolon
    }

    pub fn is_empty(&self) -> bool {
        self.close_braces == 0 && self.semicolons == 0
    }

    /// Queue a `} ;` pair for each of `blocks` closed blocks.
    pub(crate) fn queue_dedent(&mut self, blocks: u32) {
        self.close_braces += blocks;
        self.semicolons += blocks;
    }

    /// Queue the `}` that follows the separator emitted in front of an explicit `}`.
    pub(crate) fn queue_explicit_close(&mut self) {
        self.close_braces += 1;
    }

    pub(crate) fn suppress_final(&mut self) {
        self.suppress_final_semicolon = true;
    }

    /// Take the next owed token, if any.
    pub(crate) fn pop_next(&mut self) -> Option<Symbol> {
        if self.close_braces > 0 && self.close_braces >= self.semicolons {
            self.close_braces -= 1;
            if self.semicolons == 1 && self.suppress_final_semicolon {
                self.semicolons = 0;
                self.suppress_final_semicolon = false;
            }
            Some(Symbol::CloseBrace)
        } else if self.semicolons > 0 {
            self.semicolons -= 1;
            Some(Symbol::Semicolon)
        } else {
            None
        }
    }
}

/// Everything the scanner remembers between calls; the unit of serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScannerState {
    pub(crate) layout: LayoutStack,
    pub(crate) pending: PendingEmission,
    pub(crate) eof_semicolon_emitted: bool,
    /// An explicit `{` was consumed; the next whitespace scan records its block's level.
    pub(crate) push_after_open_brace: bool,
}

impl ScannerState {
    /// Fresh state for the start of a parse.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a state from its parts (layout levels bottom to top).
    pub fn from_parts(
        levels: Vec<IndentLevel>,
        pending: PendingEmission,
        eof_semicolon_emitted: bool,
        push_after_open_brace: bool,
    ) -> Self {
        Self {
            layout: LayoutStack::from_levels(levels),
            pending,
            eof_semicolon_emitted,
            push_after_open_brace,
        }
    }

    pub fn layout(&self) -> &LayoutStack {
        &self.layout
    }

    pub fn pending(&self) -> &PendingEmission {
        &self.pending
    }

    pub fn eof_semicolon_emitted(&self) -> bool {
        self.eof_semicolon_emitted
    }

    pub fn push_after_open_brace(&self) -> bool {
        self.push_after_open_brace
    }

    /// Record that an explicit `{` was consumed.
    ///
    /// ## Errors
    /// - [`ScanError::PendingPushOutstanding`] if the previous `{` has not had its level recorded yet; the host
    ///   skipped the whitespace scan that should have consumed it.
    pub(crate) fn arm_push_after_open_brace(&mut self) -> Result<(), ScanError> {
        if self.push_after_open_brace {
            return Err(ScanError::PendingPushOutstanding);
        }
        self.push_after_open_brace = true;
        Ok(())
    }

    /// Disarm the pending push, reporting whether one was outstanding.
    pub(crate) fn take_push_after_open_brace(&mut self) -> bool {
        std::mem::take(&mut self.push_after_open_brace)
    }
}
