//! Kokascan version information.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The kokascan version string (for example, `0.1.0-alpha.1`).
pub const KOKASCAN_VERSION: &str = env!("CARGO_PKG_VERSION");
