//! Acceptance sets: which external symbols the host's current parse state would take next.

pub use kokascan_core::lang::symbols::{SYMBOL_COUNT, Symbol};

/// Fixed-size boolean vector indexed by [`Symbol::index`].
///
/// ## Notes
/// - The scanner never returns a symbol whose slot is `false`, with one exception: the end-of-input semicolon is
///   emitted once regardless.
/// - Hosts hand over raw vectors via [`ValidSymbols::from_slice`]; missing trailing slots read as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidSymbols([bool; SYMBOL_COUNT]);

impl ValidSymbols {
    /// Nothing acceptable.
    pub const fn none() -> Self {
        Self([false; SYMBOL_COUNT])
    }

    /// Every symbol the scanner can emit; the grammar is not inside an explicit continuation.
    pub fn emittable() -> Self {
        Symbol::ALL.iter().filter(|s| s.is_emitted()).fold(Self::none(), |set, s| set.with(*s))
    }

    /// Exactly the given symbols.
    pub fn only(symbols: &[Symbol]) -> Self {
        symbols.iter().fold(Self::none(), |set, s| set.with(*s))
    }

    /// Build from a host-provided vector.
    pub fn from_slice(slots: &[bool]) -> Self {
        let mut set = Self::none();
        for (slot, valid) in set.0.iter_mut().zip(slots) {
            *slot = *valid;
        }
        set
    }

    pub fn with(mut self, symbol: Symbol) -> Self {
        self.0[symbol.index()] = true;
        self
    }

    pub fn without(mut self, symbol: Symbol) -> Self {
        self.0[symbol.index()] = false;
        self
    }

    pub fn accepts(&self, symbol: Symbol) -> bool {
        self.0[symbol.index()]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}
