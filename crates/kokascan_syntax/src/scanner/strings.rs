//! Raw string literals: `r"…"`, `r#"…"#`, `r##"…"##`, …

use crate::cursor::Cursor;
use crate::diagnostics::ScanError;
use crate::symbols::Symbol;

/// Scan a raw string starting at the `r` under the cursor.
///
/// The literal ends at the first quote followed by exactly as many `#` as it was opened with. A quote that
/// falls short of the count is content, and so are the `#` after it.
///
/// ## Errors
/// - [`ScanError::NotRawString`] if `r` is not followed by `#`* and a quote (an ordinary identifier).
/// - [`ScanError::UnterminatedRawString`] if input ends first.
pub(super) fn scan_raw_string<C: Cursor + ?Sized>(cursor: &mut C) -> Result<Symbol, ScanError> {
    debug_assert_eq!(cursor.lookahead(), Some('r'));
    cursor.advance();

    let mut pounds = 0u32;
    while cursor.lookahead() == Some('#') {
        pounds += 1;
        cursor.advance();
    }
    if cursor.lookahead() != Some('"') {
        return Err(ScanError::NotRawString);
    }
    cursor.advance();

    loop {
        match cursor.lookahead() {
            None => return Err(ScanError::UnterminatedRawString { pounds }),
            Some('"') => {
                cursor.advance();
                if closes(cursor, pounds) {
                    cursor.mark_end();
                    return Ok(Symbol::RawString);
                }
            }
            Some(_) => cursor.advance(),
        }
    }
}

/// Consume up to `pounds` `#`; stop at the first other character without consuming it.
fn closes<C: Cursor + ?Sized>(cursor: &mut C, pounds: u32) -> bool {
    for _ in 0..pounds {
        if cursor.lookahead() != Some('#') {
            return false;
        }
        cursor.advance();
    }
    true
}
