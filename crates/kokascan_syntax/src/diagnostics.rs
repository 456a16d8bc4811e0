//! Scanner and checkpoint errors.
//!
//! Scan failures are the normal way of saying "no external token here": the host rolls back and lexes the
//! position another way. Only protocol violations are fatal.

use miette::Diagnostic;
use thiserror::Error;

/// Why a `scan` call produced no token.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ScanError {
    #[error("no external token applies at this position")]
    #[diagnostic(code(kokascan::scan::no_token))]
    NoToken,

    #[error("line continues the previous statement")]
    #[diagnostic(code(kokascan::scan::continuation_line))]
    ContinuationLine,

    #[error("`r` is not followed by `#`* and a quote")]
    #[diagnostic(code(kokascan::scan::not_raw_string))]
    NotRawString,

    #[error("raw string opened with {pounds} `#` is not terminated before end of input")]
    #[diagnostic(
        code(kokascan::scan::unterminated_raw_string),
        help("close the literal with a quote followed by the same number of `#` it was opened with")
    )]
    UnterminatedRawString { pounds: u32 },

    #[error("`{{` consumed while the layout push for a previous `{{` is still outstanding")]
    #[diagnostic(
        code(kokascan::scan::pending_push_outstanding),
        help("the host must run a scan between two explicit open braces")
    )]
    PendingPushOutstanding,
}

impl ScanError {
    /// Whether the host may retry the position under another interpretation.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ScanError::PendingPushOutstanding)
    }
}

/// Why a serialized state could not be written or read.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum StateError {
    #[error("serialization buffer of {capacity} bytes cannot hold the {header}-byte header")]
    #[diagnostic(code(kokascan::state::buffer_too_small))]
    BufferTooSmall { capacity: usize, header: usize },

    #[error("serialized state of {len} bytes is shorter than the {header}-byte header")]
    #[diagnostic(code(kokascan::state::truncated_header))]
    TruncatedHeader { len: usize, header: usize },

    #[error("serialized layout levels end with {trailing} stray bytes")]
    #[diagnostic(code(kokascan::state::misaligned_levels))]
    MisalignedLevels { trailing: usize },

    #[error("flag byte at offset {offset} is {value}, expected 0 or 1")]
    #[diagnostic(code(kokascan::state::invalid_flag))]
    InvalidFlag { offset: usize, value: u8 },
}
