//! Layout scanner for Koka: turns indentation into synthetic `{`, `}` and `;` tokens.
//!
//! The scanner is an *external* tokenizer. A host parsing engine owns ordinary lexing and the syntax tree; it
//! calls [`Scanner::scan`] once per lexical decision with a [`Cursor`] and the set of external symbols its
//! current parse state accepts ([`ValidSymbols`]). The scanner answers with one [`Symbol`] (its extent recorded on
//! the cursor via `mark_end`) or fails, in which case nothing was committed and the host is free to try another
//! interpretation from the same position.
//!
//! ## Notes
//! - All cross-call memory lives in [`ScannerState`], which the host checkpoints with
//!   [`Scanner::serialize`] / [`Scanner::deserialize`] at incremental-parse boundaries.
//! - A failed `scan` leaves the state exactly as it found it.
//! - Vocabulary (symbol slots, continuation leads, tab width) comes from `kokascan_core::lang`.
//!
//! ## Examples
//! ```rust
//! use kokascan_syntax::{Scanner, SourceCursor, Symbol, ValidSymbols};
//!
//! let mut scanner = Scanner::new();
//! let mut cursor = SourceCursor::new("\n  x");
//! cursor.begin();
//! assert_eq!(scanner.scan(&mut cursor, &ValidSymbols::emittable()), Ok(Symbol::OpenBrace));
//! assert!(cursor.commit().is_empty());
//! assert_eq!(scanner.state().layout().top(), Some(2));
//! ```

pub mod checkpoint;
pub mod cursor;
pub mod diagnostics;
pub mod layout;
pub mod scanner;
pub mod state;
pub mod symbols;
pub mod tokens;

pub use checkpoint::{HEADER_LEN, LEVEL_LEN};
pub use cursor::{Cursor, SourceCursor};
pub use diagnostics::{ScanError, StateError};
pub use layout::{IndentLevel, LayoutStack};
pub use scanner::Scanner;
pub use state::{PendingEmission, ScannerState};
pub use symbols::{Symbol, ValidSymbols};
pub use tokens::{Span, Token};
