//! Line-head measurement and the off-side rule.

use std::cmp::Ordering;

use kokascan_core::lang::layout::TAB_WIDTH;

use super::Scanner;
use super::continuation::LineLead;
use crate::cursor::Cursor;
use crate::diagnostics::ScanError;
use crate::layout::IndentLevel;
use crate::symbols::{Symbol, ValidSymbols};

/// Whitespace in front of the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LineHead {
    /// Width of the whitespace since the last line break; meaningful only when `crossed_newline` is set.
    pub indent: IndentLevel,
    pub crossed_newline: bool,
    pub at_eof: bool,
}

/// Skip spaces, tabs and line breaks, measuring the indentation of the last line crossed.
///
/// ## Notes
/// - A space counts 1, a tab [`TAB_WIDTH`]. `\r` and `\n` reset the count.
/// - Other whitespace stops the scan; the host treats it as ordinary trivia.
pub(super) fn measure_line_head<C: Cursor + ?Sized>(cursor: &mut C) -> LineHead {
    let mut indent: IndentLevel = 0;
    let mut crossed_newline = false;
    loop {
        match cursor.lookahead() {
            Some(' ') => indent = indent.saturating_add(1),
            Some('\t') => indent = indent.saturating_add(TAB_WIDTH),
            Some('\r') => indent = 0,
            Some('\n') => {
                crossed_newline = true;
                indent = 0;
            }
            _ => break,
        }
        cursor.skip();
    }

    LineHead {
        indent,
        crossed_newline,
        at_eof: cursor.is_eof(),
    }
}

impl Scanner {
    /// Compare a fresh line's indentation with the innermost block.
    ///
    /// ## Returns
    /// - `Ok(Some(_))` for an inserted `{` (deeper), `;` (same column) or the first `;` of a dedent run.
    /// - `Ok(None)` when the rule does not apply; the caller continues with end-of-input and explicit tokens.
    ///
    /// ## Errors
    /// - [`ScanError::ContinuationLine`] when a same-column line turns out to continue the previous statement.
    pub(super) fn apply_layout_rule<C: Cursor + ?Sized>(
        &mut self,
        cursor: &mut C,
        valid: &ValidSymbols,
        head: LineHead,
        lead: &mut LineLead,
    ) -> Result<Option<Symbol>, ScanError> {
        let current = self.state.layout.top_or_base();
        let in_continuation = valid.accepts(Symbol::EndContinuation);

        match head.indent.cmp(&current) {
            Ordering::Greater => {
                // Trailing indentation at end of input opens nothing.
                if valid.accepts(Symbol::OpenBrace) && !in_continuation && !head.at_eof && !lead.continues(cursor) {
                    self.state.layout.push(head.indent);
                    return Ok(Some(Symbol::OpenBrace));
                }
            }
            Ordering::Equal => {
                if valid.accepts(Symbol::Semicolon) && !in_continuation && !lead.is_immediate() {
                    if lead.continues(cursor) {
                        return Err(ScanError::ContinuationLine);
                    }
                    return Ok(Some(Symbol::Semicolon));
                }
            }
            Ordering::Less => {
                // A dedent onto an explicit `}` is handled by the brace itself.
                if valid.accepts(Symbol::Semicolon) && cursor.lookahead() != Some('}') {
                    let closed = self.state.layout.pop_above(head.indent);
                    let landed = self.state.layout.top_or_base();
                    if landed != head.indent {
                        tracing::debug!(
                            indent = head.indent,
                            enclosing = landed,
                            "dedent to a column that matches no open block"
                        );
                    }
                    self.state.pending.queue_dedent(closed);
                    if lead.continues(cursor) {
                        self.state.pending.suppress_final();
                    }
                    return Ok(Some(Symbol::Semicolon));
                }
            }
        }

        Ok(None)
    }
}
