//! Provide the shared, pure vocabulary of the Koka layout scanner.
//!
//! This crate is intentionally small and dependency-free. It records the facts that both the scanner and its
//! tooling (CLI, fuzzers, guardrail tests) need to agree on:
//! - the external symbols the host grammar declares, in slot order,
//! - which line-head characters and words mark a continuation line,
//! - the layout constants (tab width, serialization buffer capacity).
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no scanner types.
//! - Enforcement of the layout rule lives in `kokascan_syntax`; registries only describe.

pub mod lang;
