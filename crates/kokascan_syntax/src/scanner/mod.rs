//! The layout scanner.
//!
//! Handles, per host call:
//! - draining synthetic tokens queued by an earlier multi-block dedent
//! - the off-side rule at line starts (`{` on indent, `;` on equal indent, `} ;` runs on dedent)
//! - the single end-of-input `;`
//! - explicit `{`, `}`, `;` and raw string literals
//!
//! ## Module Structure
//!
//! - `indent` - line-head measurement and the off-side rule
//! - `continuation` - deciding whether a line head continues the previous statement
//! - `strings` - raw string literals

mod continuation;
mod indent;
mod strings;


use crate::checkpoint::LEVEL_LEN;
use crate::cursor::Cursor;
use crate::diagnostics::{ScanError, StateError};
use crate::state::ScannerState;
use crate::symbols::{Symbol, ValidSymbols};

use continuation::LineLead;
use indent::measure_line_head;

// ============================================================================
// SCANNER DECISION FLOW
// ----------------------------------------------------------------------------
// [pending tokens?] → yes → emit one `}` or `;`
//        ↓ no
// [measure line head] → [record level for a preceding `{`]
//        ↓
// [newline crossed?] → yes → off-side rule: `{` / `;` / `} ;`-run
//        ↓ no / rule declined
// [end of input?] → once → `;`
//        ↓
// [ambiguous lead?] → yes → fail (host lexes the operator/keyword)
//        ↓
// explicit `{` `}` `;` `r#"…"#`
// ============================================================================

/// External scanner for Koka layout.
///
/// One instance per parse session. The host creates it with [`Scanner::new`], restores it from checkpoints with
/// [`Scanner::deserialize`], calls [`Scanner::scan`] once per lexical decision and checkpoints it with
/// [`Scanner::serialize`]. Dropping it releases the layout stack.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    state: ScannerState,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ScannerState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn into_state(self) -> ScannerState {
        self.state
    }

    /// Layout depth that can survive a checkpoint of `capacity` bytes.
    pub fn checkpoint_depth(capacity: usize) -> usize {
        capacity.saturating_sub(crate::checkpoint::HEADER_LEN) / LEVEL_LEN
    }

    /// Write the state into the host buffer; see [`ScannerState::serialize_into`].
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, StateError> {
        self.state.serialize_into(buf)
    }

    /// Replace the state with one read from a host buffer. On error the scanner is left untouched.
    pub fn deserialize(&mut self, buf: &[u8]) -> Result<(), StateError> {
        self.state = ScannerState::deserialize(buf)?;
        Ok(())
    }

    /// Decide the next external token at the cursor.
    ///
    /// ## Returns
    /// - `Ok(symbol)`: the token's end has been marked on the cursor.
    /// - `Err(_)`: nothing applies. The state is unchanged and the cursor's reads are speculative; the host
    ///   should roll back and lex the position another way. Only
    ///   [`ScanError::PendingPushOutstanding`] is not recoverable.
    pub fn scan<C: Cursor + ?Sized>(&mut self, cursor: &mut C, valid: &ValidSymbols) -> Result<Symbol, ScanError> {
        let before = self.state.clone();
        let result = self.scan_inner(cursor, valid);
        match &result {
            Ok(symbol) => tracing::trace!(
                %symbol,
                depth = self.state.layout.len(),
                pending_close = self.state.pending.close_braces(),
                pending_semi = self.state.pending.semicolons(),
                "external token"
            ),
            Err(error) => {
                tracing::trace!(%error, "no external token");
                self.state = before;
            }
        }
        result
    }

    fn scan_inner<C: Cursor + ?Sized>(&mut self, cursor: &mut C, valid: &ValidSymbols) -> Result<Symbol, ScanError> {
        if let Some(symbol) = self.drain_pending(cursor) {
            return Ok(symbol);
        }

        let head = measure_line_head(cursor);
        // Layout tokens are zero-width at the line head; anything read after this is lookahead.
        cursor.mark_end();

        if self.state.take_push_after_open_brace() {
            let level = if head.crossed_newline { head.indent } else { cursor.column() };
            self.state.layout.push(level);
        }

        let mut lead = LineLead::classify(cursor.lookahead());

        if head.crossed_newline {
            if let Some(symbol) = self.apply_layout_rule(cursor, valid, head, &mut lead)? {
                return Ok(symbol);
            }
        }

        if head.at_eof && !self.state.eof_semicolon_emitted {
            self.state.eof_semicolon_emitted = true;
            return Ok(Symbol::Semicolon);
        }

        // `<`, `>`, `t`, `e` never start an explicit token; the host lexes them.
        if lead.is_ambiguous() {
            return Err(ScanError::NoToken);
        }

        self.scan_explicit(cursor, valid)
    }

    /// Emit one owed `}` or `;`.
    fn drain_pending<C: Cursor + ?Sized>(&mut self, cursor: &mut C) -> Option<Symbol> {
        let symbol = self.state.pending.pop_next()?;
        // The `}` queued behind an explicit close brace covers the brace itself.
        if symbol == Symbol::CloseBrace && self.state.pending.is_empty() && cursor.lookahead() == Some('}') {
            cursor.advance();
        }
        cursor.mark_end();
        Some(symbol)
    }

    fn scan_explicit<C: Cursor + ?Sized>(&mut self, cursor: &mut C, valid: &ValidSymbols) -> Result<Symbol, ScanError> {
        match cursor.lookahead() {
            Some('{') if valid.accepts(Symbol::OpenBrace) => {
                self.state.arm_push_after_open_brace()?;
                cursor.advance();
                cursor.mark_end();
                Ok(Symbol::OpenBrace)
            }
            Some('}') if valid.accepts(Symbol::CloseBrace) => {
                // Separator first (zero-width, before the brace); the brace follows on the next call.
                self.state.layout.pop();
                self.state.pending.queue_explicit_close();
                Ok(Symbol::Semicolon)
            }
            Some(';') if valid.accepts(Symbol::Semicolon) => {
                cursor.advance();
                cursor.mark_end();
                Ok(Symbol::Semicolon)
            }
            Some('r') if valid.accepts(Symbol::RawString) => strings::scan_raw_string(cursor),
            _ => Err(ScanError::NoToken),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::SourceCursor;
    use crate::state::PendingEmission;
    use crate::tokens::{Span, Token};

    /// Drive the scanner like a permissive host: on failure, skip whitespace and one ordinary word.
    fn stream(source: &str) -> Vec<Token> {
        stream_with(source, ValidSymbols::emittable())
    }

    fn stream_with(source: &str, valid: ValidSymbols) -> Vec<Token> {
        let mut scanner = Scanner::new();
        let mut cursor = SourceCursor::new(source);
        let mut tokens = Vec::new();
        loop {
            cursor.begin();
            match scanner.scan(&mut cursor, &valid) {
                Ok(kind) => tokens.push(Token::new(kind, cursor.commit())),
                Err(_) => {
                    cursor.rollback();
                    cursor.skip_whitespace();
                    if cursor.is_eof() {
                        return tokens;
                    }
                    while cursor.lookahead().is_some_and(|c| !c.is_whitespace()) {
                        cursor.advance();
                    }
                    cursor.commit();
                }
            }
        }
    }

    fn kinds(tokens: &[Token]) -> Vec<Symbol> {
        tokens.iter().map(|t| t.kind).collect()
    }

    fn scan_once(scanner: &mut Scanner, source: &str, valid: ValidSymbols) -> (Result<Symbol, ScanError>, Span) {
        let mut cursor = SourceCursor::new(source);
        cursor.begin();
        let result = scanner.scan(&mut cursor, &valid);
        let span = if result.is_ok() { cursor.commit() } else { Span::empty(0) };
        (result, span)
    }

    #[test]
    fn test_indent_opens_block_before_anything_else() {
        let mut scanner = Scanner::new();
        let (result, span) = scan_once(&mut scanner, "\n    x", ValidSymbols::emittable());
        assert_eq!(result, Ok(Symbol::OpenBrace));
        assert_eq!(span, Span::empty(5));
        assert_eq!(scanner.state().layout().levels(), &[4]);
    }

    #[test]
    fn test_block_example_stream() {
        let tokens = stream("block:\n  x = 1\n  y = 2\nrest");
        use Symbol::*;
        assert_eq!(
            kinds(&tokens),
            vec![OpenBrace, Semicolon, Semicolon, CloseBrace, Semicolon, Semicolon]
        );
        // `{` at `x`, `;` at `y`, the dedent run at `rest`, the terminator at end of input.
        let starts: Vec<usize> = tokens.iter().map(|t| t.span.start).collect();
        assert_eq!(starts, vec![9, 17, 23, 23, 23, 27]);
        assert!(tokens.iter().all(Token::is_synthetic));
    }

    #[test]
    fn test_open_brace_requires_acceptance() {
        let mut scanner = Scanner::new();
        let valid = ValidSymbols::emittable().without(Symbol::OpenBrace);
        let (result, _) = scan_once(&mut scanner, "\n  x", valid);
        assert_eq!(result, Err(ScanError::NoToken));
        assert!(scanner.state().layout().is_empty());
    }

    #[test]
    fn test_end_continuation_suppresses_layout() {
        let valid = ValidSymbols::emittable().with(Symbol::EndContinuation);

        let mut scanner = Scanner::new();
        assert_eq!(scan_once(&mut scanner, "\n  x", valid).0, Err(ScanError::NoToken));

        let mut scanner = Scanner::with_state(ScannerState::from_parts(
            vec![2],
            PendingEmission::default(),
            false,
            false,
        ));
        assert_eq!(scan_once(&mut scanner, "\n  x", valid).0, Err(ScanError::NoToken));
    }

    #[test]
    fn test_multi_level_dedent_closes_each_block() {
        let tokens = stream("a\n  b\n    c\n      d\ne");
        use Symbol::*;
        assert_eq!(
            kinds(&tokens),
            vec![
                OpenBrace, OpenBrace, OpenBrace, // three indents
                Semicolon,  // ends `d`
                CloseBrace, Semicolon, CloseBrace, Semicolon, CloseBrace, Semicolon,
                Semicolon, // end of input
            ]
        );
    }

    #[test]
    fn test_dedent_pops_exactly_the_closed_levels() {
        let mut scanner = Scanner::with_state(ScannerState::from_parts(
            vec![2, 4, 6],
            PendingEmission::default(),
            false,
            false,
        ));
        let (result, _) = scan_once(&mut scanner, "\n  x", ValidSymbols::emittable());
        assert_eq!(result, Ok(Symbol::Semicolon));
        assert_eq!(scanner.state().layout().levels(), &[2]);
        assert_eq!(scanner.state().pending(), &PendingEmission::new(2, 2, false));
    }

    #[test]
    fn test_dedent_onto_continuation_binds_into_outer_block() {
        let tokens = stream("x\n    y\n  .z");
        use Symbol::*;
        // No `;` after the `}`: `.z` continues the statement that owns the closed block.
        assert_eq!(kinds(&tokens), vec![OpenBrace, Semicolon, CloseBrace, Semicolon]);
        assert_eq!(tokens[3].span, Span::empty(12));
    }

    #[test]
    fn test_dedent_before_explicit_close_brace_is_left_to_the_brace() {
        let source = "f {\n  x\n}";
        let tokens = stream(source);
        use Symbol::*;
        assert_eq!(
            kinds(&tokens),
            vec![OpenBrace, Semicolon, Semicolon, CloseBrace, Semicolon]
        );
        assert_eq!(&source[tokens[0].span.start..tokens[0].span.end], "{");
        assert_eq!(tokens[2].span, Span::empty(8));
        assert_eq!(&source[tokens[3].span.start..tokens[3].span.end], "}");
    }

    #[test]
    fn test_open_brace_records_level_of_first_token() {
        let mut scanner = Scanner::new();
        let mut cursor = SourceCursor::new("{ x");
        cursor.begin();
        assert_eq!(scanner.scan(&mut cursor, &ValidSymbols::emittable()), Ok(Symbol::OpenBrace));
        assert_eq!(cursor.commit(), Span::new(0, 1));
        assert!(scanner.state().push_after_open_brace());

        // Same line: the level is the column of `x`. The scan itself fails, so nothing sticks.
        cursor.begin();
        assert_eq!(scanner.scan(&mut cursor, &ValidSymbols::emittable()), Err(ScanError::NoToken));
        cursor.rollback();
        assert!(scanner.state().push_after_open_brace());
        assert!(scanner.state().layout().is_empty());
    }

    #[test]
    fn test_open_brace_then_newline_pushes_measured_indent() {
        let tokens = stream("f {\n   x\n   y }");
        use Symbol::*;
        assert_eq!(
            kinds(&tokens),
            vec![OpenBrace, Semicolon, Semicolon, Semicolon, CloseBrace, Semicolon]
        );
    }

    #[test]
    fn test_explicit_semicolon_is_consumed() {
        let mut scanner = Scanner::new();
        let (result, span) = scan_once(&mut scanner, "  ; x", ValidSymbols::emittable());
        assert_eq!(result, Ok(Symbol::Semicolon));
        assert_eq!(span, Span::new(2, 3));
    }

    #[test]
    fn test_eof_semicolon_emitted_once() {
        let mut scanner = Scanner::new();
        let (first, _) = scan_once(&mut scanner, "  ", ValidSymbols::none());
        assert_eq!(first, Ok(Symbol::Semicolon));
        assert!(scanner.state().eof_semicolon_emitted());
        let (second, _) = scan_once(&mut scanner, "  ", ValidSymbols::emittable());
        assert_eq!(second, Err(ScanError::NoToken));
    }

    #[test]
    fn test_equal_indent_continuations_get_no_separator() {
        for head in [".map(f)", "-> x", "|| y", "then 1", "else 2", "elif c", "> 3", "< 4", "<- x", ">|x"] {
            let source = format!("a\n{head}");
            let tokens = stream(&source);
            assert_eq!(kinds(&tokens), vec![Symbol::Semicolon], "line head {head:?}");
        }
    }

    #[test]
    fn test_equal_indent_statements_get_a_separator() {
        for head in ["thenX", "elsewhere", "x", ">> 2", "<< 1", ">|< z", "t", "e"] {
            let source = format!("a\n{head}");
            let tokens = stream(&source);
            assert_eq!(
                kinds(&tokens),
                vec![Symbol::Semicolon, Symbol::Semicolon],
                "line head {head:?}"
            );
        }
    }

    #[test]
    fn test_failed_ambiguous_resolution_commits_nothing() {
        let mut scanner = Scanner::with_state(ScannerState::from_parts(
            vec![2],
            PendingEmission::default(),
            false,
            false,
        ));
        let before = scanner.state().clone();
        let mut cursor = SourceCursor::new("\n  then x");
        cursor.begin();
        assert_eq!(
            scanner.scan(&mut cursor, &ValidSymbols::emittable()),
            Err(ScanError::ContinuationLine)
        );
        cursor.rollback();
        assert_eq!(cursor.offset(), 0);
        assert_eq!(scanner.state(), &before);
    }

    #[test]
    fn test_ambiguous_lead_never_opens_block_when_it_continues() {
        let tokens = stream("if c\n  then a\n  else b");
        use Symbol::*;
        // `then` at deeper indent continues `if c`; `else` at the same column continues too.
        assert_eq!(kinds(&tokens), vec![Semicolon]);
    }

    #[test]
    fn test_raw_strings() {
        let source = r###"r##"a"b"## rest"###;
        let mut scanner = Scanner::new();
        let (result, span) = scan_once(&mut scanner, source, ValidSymbols::emittable());
        assert_eq!(result, Ok(Symbol::RawString));
        assert_eq!(&source[span.start..span.end], r###"r##"a"b"##"###);

        let (result, _) = scan_once(&mut scanner, r##"r#"a""##, ValidSymbols::emittable());
        assert_eq!(result, Err(ScanError::UnterminatedRawString { pounds: 1 }));

        let (result, _) = scan_once(&mut scanner, r#"r"x""#, ValidSymbols::none());
        assert_eq!(result, Err(ScanError::NoToken));
    }

    #[test]
    fn test_pending_tokens_drain_before_layout() {
        let mut scanner = Scanner::with_state(ScannerState::from_parts(
            vec![],
            PendingEmission::new(1, 1, false),
            false,
            false,
        ));
        // Even with nothing acceptable, owed tokens come out one per call.
        assert_eq!(scan_once(&mut scanner, "\n    x", ValidSymbols::none()).0, Ok(Symbol::CloseBrace));
        assert_eq!(scan_once(&mut scanner, "\n    x", ValidSymbols::none()).0, Ok(Symbol::Semicolon));
        assert!(scanner.state().pending().is_empty());
    }

    #[test]
    fn test_deserialize_error_leaves_scanner_untouched() {
        let mut scanner = Scanner::with_state(ScannerState::from_parts(
            vec![4],
            PendingEmission::default(),
            true,
            false,
        ));
        let before = scanner.state().clone();
        assert!(scanner.deserialize(&[1, 2, 3]).is_err());
        assert_eq!(scanner.state(), &before);
        scanner.deserialize(&[]).unwrap();
        assert_eq!(scanner.state(), &ScannerState::new());
    }

    #[test]
    fn test_checkpoint_depth() {
        assert_eq!(Scanner::checkpoint_depth(1024), 253);
        assert_eq!(Scanner::checkpoint_depth(4), 0);
    }
}
