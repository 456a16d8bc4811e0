#![forbid(unsafe_code)]
//! Kokascan: the layout scanner for Koka, with a stand-in parsing host and CLI.
//!
//! Koka blocks are delimited by indentation. A parser generator's grammar cannot see indentation, so an external
//! scanner turns it into synthetic `{`, `}` and `;` tokens. This crate packages that scanner
//! ([`kokascan_syntax`]) with a driver that runs it over whole files the way a parsing host would, and a CLI for
//! inspecting the resulting token streams and checkpoints.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod driver;
pub mod version;

pub use config::{AcceptancePolicy, DriverConfig};
pub use driver::{Checkpoint, DriverError, LayoutDriver, LayoutStream, Lexeme, LexemeKind, tokenize};
pub use kokascan_syntax::{Scanner, ScannerState, Symbol};
