//! A stand-in parsing host that drives the layout scanner over a whole source.
//!
//! A real host owns a grammar: it knows which external symbols its parse state accepts and how to lex everything
//! that is not external. The driver approximates both. Acceptance comes from an [`AcceptancePolicy`], and
//! ordinary text is cut into coarse chunks (identifier runs, operator runs, single characters). That is enough to
//! exercise the scanner's contract end to end: every call gets a fresh attempt, failures are rolled back, and a
//! checkpoint is saved after every external token.
//!
//! ## Notes
//! - The driver stops once the input is exhausted and the scanner has nothing more to say there.
//! - A zero-width token that neither moves the cursor nor changes the state would repeat forever; the driver
//!   reports it as [`DriverError::Stalled`] instead of looping.
//!
//! ## Examples
//! ```rust
//! use kokascan::config::DriverConfig;
//! use kokascan::driver::tokenize;
//!
//! let source = "f\n  x\ny";
//! let stream = tokenize(source, &DriverConfig::default()).unwrap();
//! assert_eq!(stream.compact(source), "f { x ; } ; y ;");
//! ```
//!
//! ## See also
//! - `kokascan_syntax::Scanner` for the per-call contract

use kokascan_syntax::{Cursor, ScanError, Scanner, ScannerState, SourceCursor, Span, StateError, Symbol};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::config::{AcceptancePolicy, DriverConfig};

// ============================================================================
// Stream types
// ============================================================================

/// What produced a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    /// Returned by the layout scanner.
    External(Symbol),
    /// Lexed by the host.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub span: Span,
}

impl Lexeme {
    /// Source text under the lexeme (empty for zero-width tokens).
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.start..self.span.end).unwrap_or_default()
    }

    /// Printable form: the token's surface spelling for zero-width externals, the source text otherwise.
    pub fn render<'s>(&self, source: &'s str) -> &'s str {
        match self.kind {
            LexemeKind::External(symbol) if self.span.is_empty() => symbol.display(),
            _ => self.text(source),
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            LexemeKind::External(symbol) => Some(symbol),
            LexemeKind::Text => None,
        }
    }
}

/// Serialized scanner state together with the offset to resume scanning from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub offset: usize,
    pub state: Vec<u8>,
}

impl Checkpoint {
    /// Start of input with a fresh scanner.
    pub fn initial() -> Self {
        Self {
            offset: 0,
            state: Vec::new(),
        }
    }
}

/// Everything a driver run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutStream {
    pub lexemes: Vec<Lexeme>,
    /// The starting checkpoint, then one per external token.
    pub checkpoints: Vec<Checkpoint>,
}

impl LayoutStream {
    /// External tokens only.
    pub fn externals(&self) -> impl Iterator<Item = (Symbol, Span)> + '_ {
        self.lexemes
            .iter()
            .filter_map(|lexeme| lexeme.symbol().map(|symbol| (symbol, lexeme.span)))
    }

    /// One line, lexemes separated by single spaces.
    pub fn compact(&self, source: &str) -> String {
        self.lexemes
            .iter()
            .map(|lexeme| lexeme.render(source))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check that every checkpoint restores to a state that serializes back to the same bytes.
    ///
    /// ## Errors
    /// - [`DriverError::State`] if a checkpoint does not deserialize.
    /// - [`DriverError::CheckpointMismatch`] if re-serializing changes it.
    pub fn verify_checkpoints(&self, capacity: usize) -> Result<(), DriverError> {
        for checkpoint in self.checkpoints.iter().filter(|c| !c.state.is_empty()) {
            let restored = ScannerState::deserialize(&checkpoint.state)?;
            if restored.to_checkpoint(capacity)? != checkpoint.state {
                return Err(DriverError::CheckpointMismatch {
                    offset: checkpoint.offset,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error, Diagnostic)]
pub enum DriverError {
    #[error("scanner rejected the call sequence at byte {offset}")]
    #[diagnostic(code(kokascan::driver::protocol))]
    Protocol {
        offset: usize,
        #[source]
        error: ScanError,
        #[label("scanner stopped here")]
        at: SourceSpan,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    State(#[from] StateError),

    #[error("scanner returned `{symbol}` at byte {offset} without consuming input or changing state")]
    #[diagnostic(code(kokascan::driver::stalled))]
    Stalled {
        symbol: Symbol,
        offset: usize,
        #[label("no progress here")]
        at: SourceSpan,
    },

    #[error("checkpoint offset {offset} is not a character boundary of the {len}-byte source")]
    #[diagnostic(code(kokascan::driver::bad_checkpoint))]
    BadCheckpoint { offset: usize, len: usize },

    #[error("checkpoint at byte {offset} changes when restored and saved again")]
    #[diagnostic(code(kokascan::driver::checkpoint_mismatch))]
    CheckpointMismatch { offset: usize },
}

// ============================================================================
// Driver
// ============================================================================

/// Runs one parse session over `source`.
#[derive(Debug)]
pub struct LayoutDriver<'s> {
    source: &'s str,
    config: DriverConfig,
    scanner: Scanner,
    cursor: SourceCursor<'s>,
    origin: Checkpoint,
}

impl<'s> LayoutDriver<'s> {
    pub fn new(source: &'s str, config: DriverConfig) -> Self {
        Self {
            source,
            config,
            scanner: Scanner::new(),
            cursor: SourceCursor::new(source),
            origin: Checkpoint::initial(),
        }
    }

    /// Continue a session from a saved checkpoint, as an incremental reparse would.
    ///
    /// ## Errors
    /// - [`DriverError::BadCheckpoint`] if the offset does not lie on a character boundary of `source`.
    /// - [`DriverError::State`] if the saved bytes do not deserialize.
    pub fn resume(source: &'s str, config: DriverConfig, checkpoint: &Checkpoint) -> Result<Self, DriverError> {
        if !source.is_char_boundary(checkpoint.offset) {
            return Err(DriverError::BadCheckpoint {
                offset: checkpoint.offset,
                len: source.len(),
            });
        }

        let mut scanner = Scanner::new();
        scanner.deserialize(&checkpoint.state)?;
        tracing::debug!(
            offset = checkpoint.offset,
            depth = scanner.state().layout().len(),
            "resuming from checkpoint"
        );

        Ok(Self {
            source,
            config,
            scanner,
            cursor: SourceCursor::at(source, checkpoint.offset),
            origin: checkpoint.clone(),
        })
    }

    /// Drive the scanner to the end of input.
    pub fn run(mut self) -> Result<LayoutStream, DriverError> {
        let mut stream = LayoutStream {
            lexemes: Vec::new(),
            checkpoints: vec![self.origin.clone()],
        };
        // Position and state after the previous external token.
        let mut last: Option<(usize, Vec<u8>)> = None;

        loop {
            let offset = self.cursor.offset();
            let valid = self.config.policy.valid_symbols(self.source, offset);
            self.cursor.begin();

            match self.scanner.scan(&mut self.cursor, &valid) {
                Ok(symbol) => {
                    let span = self.cursor.commit();
                    let state = self.scanner.state().to_checkpoint(self.config.checkpoint_capacity)?;
                    if span.is_empty() && last.as_ref().is_some_and(|(at, prev)| *at == span.start && *prev == state) {
                        return Err(DriverError::Stalled {
                            symbol,
                            offset: span.start,
                            at: (span.start, 0).into(),
                        });
                    }

                    stream.lexemes.push(Lexeme {
                        kind: LexemeKind::External(symbol),
                        span,
                    });
                    stream.checkpoints.push(Checkpoint {
                        offset: span.end,
                        state: state.clone(),
                    });
                    last = Some((span.start, state));
                }
                Err(error) if error.is_recoverable() => {
                    self.cursor.rollback();
                    self.cursor.skip_whitespace();
                    if self.cursor.is_eof() {
                        break;
                    }
                    let span = self.lex_chunk();
                    stream.lexemes.push(Lexeme {
                        kind: LexemeKind::Text,
                        span,
                    });
                    last = None;
                }
                Err(error) => {
                    return Err(DriverError::Protocol {
                        offset,
                        error,
                        at: (offset, 0).into(),
                    });
                }
            }
        }

        tracing::debug!(
            lexemes = stream.lexemes.len(),
            checkpoints = stream.checkpoints.len(),
            "layout stream complete"
        );
        Ok(stream)
    }

    /// Lex one ordinary chunk at the cursor.
    fn lex_chunk(&mut self) -> Span {
        match self.cursor.lookahead() {
            Some(c) if is_ident_char(c) => self.advance_while(is_ident_char),
            Some(c) if is_operator_char(c) => self.advance_while(is_operator_char),
            _ => self.cursor.advance(),
        }
        self.cursor.commit()
    }

    fn advance_while(&mut self, pred: fn(char) -> bool) {
        while self.cursor.lookahead().is_some_and(pred) {
            self.cursor.advance();
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

fn is_operator_char(c: char) -> bool {
    "!$%&*+-./:<=>?@\\^|~#".contains(c)
}

/// Run a fresh session over `source`.
#[tracing::instrument(skip_all, fields(source_len = source.len(), policy = ?config.policy))]
pub fn tokenize(source: &str, config: &DriverConfig) -> Result<LayoutStream, DriverError> {
    LayoutDriver::new(source, config.clone()).run()
}

/// Shorthand for [`tokenize`] with [`AcceptancePolicy::Permissive`] and default capacity.
pub fn tokenize_permissive(source: &str) -> Result<LayoutStream, DriverError> {
    tokenize(source, &DriverConfig::default().with_policy(AcceptancePolicy::Permissive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_example() {
        let source = "block:\n  x = 1\n  y = 2\nrest";
        let stream = tokenize_permissive(source).unwrap();
        assert_eq!(stream.compact(source), "block : { x = 1 ; y = 2 ; } ; rest ;");
    }

    #[test]
    fn test_text_chunks() {
        let source = "foo'bar+=x(1)";
        let stream = tokenize_permissive(source).unwrap();
        let texts: Vec<&str> = stream
            .lexemes
            .iter()
            .filter(|l| l.kind == LexemeKind::Text)
            .map(|l| l.text(source))
            .collect();
        assert_eq!(texts, vec!["foo'bar", "+=", "x", "(", "1", ")"]);
    }

    #[test]
    fn test_checkpoint_after_every_external() {
        let source = "a\n  b\nc";
        let stream = tokenize_permissive(source).unwrap();
        assert_eq!(stream.checkpoints[0], Checkpoint::initial());
        assert_eq!(stream.checkpoints.len(), stream.externals().count() + 1);
        for (checkpoint, (_, span)) in stream.checkpoints[1..].iter().zip(stream.externals()) {
            assert_eq!(checkpoint.offset, span.end);
        }
        stream.verify_checkpoints(1024).unwrap();
    }

    #[test]
    fn test_explicit_braces_keep_their_text() {
        let source = "f { x }";
        let stream = tokenize_permissive(source).unwrap();
        assert_eq!(stream.compact(source), "f { x ; } ;");
        let braces: Vec<Span> = stream
            .externals()
            .filter(|(symbol, _)| matches!(symbol, Symbol::OpenBrace | Symbol::CloseBrace))
            .map(|(_, span)| span)
            .collect();
        assert_eq!(braces, vec![Span::new(2, 3), Span::new(6, 7)]);
    }

    #[test]
    fn test_resume_rejects_split_character() {
        let checkpoint = Checkpoint {
            offset: 1,
            state: Vec::new(),
        };
        let err = LayoutDriver::resume("λ", DriverConfig::default(), &checkpoint).unwrap_err();
        assert!(matches!(err, DriverError::BadCheckpoint { offset: 1, len: 2 }));
    }

    #[test]
    fn test_resume_rejects_garbage_state() {
        let checkpoint = Checkpoint {
            offset: 0,
            state: vec![1, 2, 3],
        };
        let err = LayoutDriver::resume("x", DriverConfig::default(), &checkpoint).unwrap_err();
        assert!(matches!(err, DriverError::State(StateError::TruncatedHeader { .. })));
    }

    #[test]
    fn test_empty_source() {
        let stream = tokenize_permissive("").unwrap();
        assert_eq!(stream.compact(""), ";");
    }
}
