//! Koka layout vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. [`symbols::Symbol`]) and look up spellings/metadata via registry tables
//! instead of comparing grammar names or characters ad hoc.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no cursor types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use kokascan_core::lang::symbols::{self, Symbol};
//!
//! assert_eq!(symbols::from_grammar_name("_semi"), Some(Symbol::Semicolon));
//! assert_eq!(Symbol::Semicolon.grammar_name(), "_semi");
//! ```

pub mod continuation;
pub mod layout;
pub mod symbols;
