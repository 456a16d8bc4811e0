//! Define which line heads continue the previous statement.
//!
//! A line that starts with an infix operator, a closing bracket, or one of the words `then`/`else`/`elif` does
//! not begin a new statement even when it sits at (or left of) the enclosing block's indentation. This module is
//! the single source of truth for those leads: a const metadata table ([`LEADS`]) plus the fast classifier
//! [`lead_certainty`] the scanner calls once per line head.
//!
//! ## Notes
//! - **Immediate** leads decide on the first character alone.
//! - **Ambiguous** leads need more lookahead; the resolution rules live in the scanner, but the spellings that
//!   are *not* continuations are recorded here as [`LeadInfo::excluded`].
//!
//! ## Examples
//! ```rust
//! use kokascan_core::lang::continuation::{self, LeadCertainty};
//!
//! assert_eq!(continuation::lead_certainty('.'), Some(LeadCertainty::Immediate));
//! assert_eq!(continuation::lead_certainty('t'), Some(LeadCertainty::Ambiguous));
//! assert_eq!(continuation::lead_certainty('x'), None);
//! ```

/// How much of the line head is needed to decide continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadCertainty {
    /// The first character alone marks a continuation.
    Immediate,
    /// The first character may begin a continuation; further lookahead decides.
    Ambiguous,
}

/// Metadata for a continuation lead character.
#[derive(Debug, Clone, Copy)]
pub struct LeadInfo {
    pub ch: char,
    pub certainty: LeadCertainty,
    /// Tokens this character begins that continue a statement (docs/diagnostics only).
    pub continues: &'static [&'static str],
    /// Spellings starting with this character that do **not** continue a statement.
    pub excluded: &'static [&'static str],
}

/// Words that continue a conditional expression when they head a line.
pub const CONTINUATION_KEYWORDS: &[&str] = &["then", "else", "elif"];

/// Registry of all continuation lead characters.
pub const LEADS: &[LeadInfo] = &[
    immediate('$', &["$"]),
    immediate('%', &["%"]),
    immediate('&', &["&", "&&"]),
    immediate('*', &["*"]),
    immediate('+', &["+", "++"]),
    immediate('@', &["@"]),
    immediate('\\', &["\\"]),
    immediate('^', &["^"]),
    immediate('?', &["?"]),
    immediate('.', &[".", ".."]),
    immediate('=', &["=", "=="]),
    immediate(')', &[")"]),
    immediate(']', &["]"]),
    immediate('{', &["{"]),
    immediate('}', &["}"]),
    immediate(':', &[":", ":="]),
    immediate('-', &["-", "->"]),
    immediate('|', &["|", "||"]),
    ambiguous('>', &[">", ">="], &[">>", ">|<"]),
    ambiguous('<', &["<", "<-", "<="], &["<<"]),
    ambiguous('t', &["then"], &[]),
    ambiguous('e', &["else", "elif"], &[]),
];

/// Classify a line-head character.
///
/// ## Returns
/// - `Some(Immediate)` / `Some(Ambiguous)` for continuation leads, `None` for everything else.
pub fn lead_certainty(c: char) -> Option<LeadCertainty> {
    match c {
        '$' | '%' | '&' | '*' | '+' | '@' | '\\' | '^' | '?' | '.' | '=' | ')' | ']' | '{' | '}' | ':' | '-'
        | '|' => Some(LeadCertainty::Immediate),
        '>' | '<' | 't' | 'e' => Some(LeadCertainty::Ambiguous),
        _ => None,
    }
}

/// Check whether a character continues an identifier for keyword-boundary purposes.
///
/// ## Notes
/// - ASCII letters, digits and `'` (Koka allows primes in identifiers). `_` and `-` are deliberately absent:
///   `then-x` still starts with the keyword `then`.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\''
}

/// Return the metadata entry for a lead character, if it is one.
pub fn info_for(c: char) -> Option<&'static LeadInfo> {
    LEADS.iter().find(|l| l.ch == c)
}

const fn immediate(ch: char, continues: &'static [&'static str]) -> LeadInfo {
    LeadInfo {
        ch,
        certainty: LeadCertainty::Immediate,
        continues,
        excluded: &[],
    }
}

const fn ambiguous(ch: char, continues: &'static [&'static str], excluded: &'static [&'static str]) -> LeadInfo {
    LeadInfo {
        ch,
        certainty: LeadCertainty::Ambiguous,
        continues,
        excluded,
    }
}
