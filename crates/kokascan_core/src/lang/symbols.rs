//! Define the external symbols the host grammar hands to the layout scanner.
//!
//! The host grammar declares its externals in a fixed order and passes a boolean acceptance vector indexed by
//! that order on every scan. [`Symbol`] mirrors that order exactly; [`SYMBOLS`] records the grammar-side names
//! and whether the scanner can ever produce the symbol.
//!
//! ## Notes
//! - The discriminant of each [`Symbol`] **is** its slot index. Reordering variants is a wire-breaking change for
//!   every host that passes an acceptance vector.
//! - `EndContinuation` is acceptance-only: the grammar marks it valid while it sits inside an explicit
//!   continuation, and the scanner reads that as "do not insert layout here".
//!
//! ## Examples
//! ```rust
//! use kokascan_core::lang::symbols::Symbol;
//!
//! assert_eq!(Symbol::from_index(3), Some(Symbol::RawString));
//! assert!(!Symbol::EndContinuation.is_emitted());
//! ```

/// Stable identifier for every external symbol, in host slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// `{`, explicit or inserted by the layout rule.
    OpenBrace = 0,
    /// `}`, explicit or inserted on dedent.
    CloseBrace = 1,
    /// `;`, explicit, inserted between statements, or the end-of-input terminator.
    Semicolon = 2,
    /// `r#"..."#` raw string literal.
    RawString = 3,
    /// Grammar-side marker for "inside an explicit continuation".
    EndContinuation = 4,
}

/// Number of slots in an acceptance vector.
pub const SYMBOL_COUNT: usize = 5;

/// Metadata for an external symbol.
#[derive(Debug, Clone, Copy)]
pub struct SymbolInfo {
    pub id: Symbol,
    /// Name of the external in the grammar definition.
    pub grammar_name: &'static str,
    /// Surface spelling used when printing token streams.
    pub display: &'static str,
    /// Whether `scan` may return this symbol.
    pub emitted: bool,
}

/// Registry of all external symbols, indexed by slot.
pub const SYMBOLS: &[SymbolInfo] = &[
    info(Symbol::OpenBrace, "_open_brace", "{", true),
    info(Symbol::CloseBrace, "_close_brace", "}", true),
    info(Symbol::Semicolon, "_semi", ";", true),
    info(Symbol::RawString, "_raw_string", "r\"…\"", true),
    info(Symbol::EndContinuation, "_end_continuation_signal", "<end-continuation>", false),
];

/// Characters that start an explicitly dispatched token (`{`, `}`, `;`, raw string `r`).
///
/// ## Notes
/// - Must stay disjoint from the ambiguous continuation leads; the scanner fails on an ambiguous lead before it
///   ever reaches explicit dispatch.
pub const EXPLICIT_LEADS: &[char] = &['{', '}', ';', 'r'];

impl Symbol {
    /// Every symbol, in slot order.
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Symbol::OpenBrace,
        Symbol::CloseBrace,
        Symbol::Semicolon,
        Symbol::RawString,
        Symbol::EndContinuation,
    ];

    /// Slot index in the host acceptance vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a slot index to its symbol.
    pub fn from_index(index: usize) -> Option<Symbol> {
        Symbol::ALL.get(index).copied()
    }

    /// Return the full metadata entry for this symbol.
    pub fn info(self) -> &'static SymbolInfo {
        &SYMBOLS[self.index()]
    }

    /// Name of the external in the grammar definition.
    pub fn grammar_name(self) -> &'static str {
        self.info().grammar_name
    }

    /// Surface spelling used in printed token streams.
    pub fn display(self) -> &'static str {
        self.info().display
    }

    /// Whether the scanner may ever return this symbol.
    pub fn is_emitted(self) -> bool {
        self.info().emitted
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Resolve a grammar external name to its symbol.
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_grammar_name(name: &str) -> Option<Symbol> {
    SYMBOLS.iter().find(|s| s.grammar_name == name).map(|s| s.id)
}

const fn info(id: Symbol, grammar_name: &'static str, display: &'static str, emitted: bool) -> SymbolInfo {
    SymbolInfo {
        id,
        grammar_name,
        display,
        emitted,
    }
}
