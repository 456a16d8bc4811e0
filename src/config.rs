//! Configuration for the stand-in parsing host.

use clap::ValueEnum;
use kokascan_core::lang::layout::SERIALIZATION_CAPACITY;
use kokascan_syntax::{Symbol, ValidSymbols};

/// How the host decides which external symbols are acceptable at a position.
///
/// A real grammar knows this from its parse state; the driver approximates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AcceptancePolicy {
    /// Every emittable symbol, everywhere.
    #[default]
    Permissive,
    /// Like `Permissive`, but an open `(`, `[`, `<` or trailing `,` puts the position inside an explicit
    /// continuation, which suppresses layout.
    Heuristic,
}

impl AcceptancePolicy {
    /// Acceptance set for a scan starting at byte `offset`.
    pub fn valid_symbols(self, source: &str, offset: usize) -> ValidSymbols {
        let valid = ValidSymbols::emittable();
        match self {
            AcceptancePolicy::Permissive => valid,
            AcceptancePolicy::Heuristic if inside_continuation(source, offset) => valid.with(Symbol::EndContinuation),
            AcceptancePolicy::Heuristic => valid,
        }
    }
}

fn inside_continuation(source: &str, offset: usize) -> bool {
    source
        .get(..offset)
        .and_then(|prefix| prefix.trim_end().chars().next_back())
        .is_some_and(|c| matches!(c, '(' | '[' | '<' | ','))
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub policy: AcceptancePolicy,
    /// Bytes available to each serialized checkpoint
    pub checkpoint_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            policy: AcceptancePolicy::Permissive,
            checkpoint_capacity: SERIALIZATION_CAPACITY,
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acceptance policy
    pub fn with_policy(mut self, policy: AcceptancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the checkpoint buffer size
    pub fn with_checkpoint_capacity(mut self, capacity: usize) -> Self {
        self.checkpoint_capacity = capacity;
        self
    }
}
