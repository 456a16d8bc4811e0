//! Serialization of [`ScannerState`] into the host's fixed-capacity checkpoint buffer.
//!
//! ## Wire format
//!
//! All integers are little-endian `u32`.
//!
//! | offset | size | field                               |
//! |-------:|-----:|-------------------------------------|
//! | 0      | 4    | pending `}` count                   |
//! | 4      | 4    | pending `;` count                   |
//! | 8      | 1    | suppress-final-semicolon flag       |
//! | 9      | 1    | end-of-input semicolon emitted flag |
//! | 10     | 1    | push-after-open-brace flag          |
//! | 11     | 4·k  | layout levels, innermost first      |
//!
//! Levels are written innermost first so that, when the stack outgrows the buffer, the levels that get dropped
//! are the outermost ones. Realistic nesting never comes close to the default 1024-byte capacity (253 levels).

use crate::diagnostics::StateError;
use crate::layout::{IndentLevel, LayoutStack};
use crate::state::{PendingEmission, ScannerState};

/// Bytes taken by the counts and flags in front of the layout levels.
pub const HEADER_LEN: usize = 11;

/// Bytes per serialized layout level.
pub const LEVEL_LEN: usize = 4;

const SUPPRESS_FLAG: usize = 8;
const EOF_FLAG: usize = 9;
const PUSH_FLAG: usize = 10;

impl ScannerState {
    /// Write this state into `buf`; return the number of bytes used.
    ///
    /// ## Notes
    /// - Never writes past `buf.len()`. Levels that do not fit are dropped, outermost first, and a warning is
    ///   logged; restoring such a checkpoint yields a shallower stack.
    ///
    /// ## Errors
    /// - [`StateError::BufferTooSmall`] if `buf` cannot hold even the header.
    pub fn serialize_into(&self, buf: &mut [u8]) -> Result<usize, StateError> {
        if buf.len() < HEADER_LEN {
            return Err(StateError::BufferTooSmall {
                capacity: buf.len(),
                header: HEADER_LEN,
            });
        }

        buf[0..4].copy_from_slice(&self.pending.close_braces().to_le_bytes());
        buf[4..8].copy_from_slice(&self.pending.semicolons().to_le_bytes());
        buf[SUPPRESS_FLAG] = u8::from(self.pending.suppress_final_semicolon());
        buf[EOF_FLAG] = u8::from(self.eof_semicolon_emitted);
        buf[PUSH_FLAG] = u8::from(self.push_after_open_brace);

        let room = (buf.len() - HEADER_LEN) / LEVEL_LEN;
        let levels = self.layout.levels();
        let kept = levels.len().min(room);
        if kept < levels.len() {
            tracing::warn!(
                depth = levels.len(),
                dropped = levels.len() - kept,
                capacity = buf.len(),
                "layout stack exceeds checkpoint capacity; dropping outermost levels"
            );
        }

        let body = &mut buf[HEADER_LEN..HEADER_LEN + kept * LEVEL_LEN];
        for (chunk, level) in body.chunks_exact_mut(LEVEL_LEN).zip(levels.iter().rev()) {
            chunk.copy_from_slice(&level.to_le_bytes());
        }

        Ok(HEADER_LEN + kept * LEVEL_LEN)
    }

    /// Serialize into a fresh buffer of `capacity` bytes, trimmed to the used length.
    pub fn to_checkpoint(&self, capacity: usize) -> Result<Vec<u8>, StateError> {
        let mut buf = vec![0; capacity];
        let len = self.serialize_into(&mut buf)?;
        buf.truncate(len);
        Ok(buf)
    }

    /// Rebuild a state from bytes produced by [`ScannerState::serialize_into`].
    ///
    /// ## Notes
    /// - An empty buffer is the host's way of asking for a fresh state.
    ///
    /// ## Errors
    /// - [`StateError::TruncatedHeader`], [`StateError::MisalignedLevels`] or [`StateError::InvalidFlag`] for
    ///   bytes this scanner could not have written.
    pub fn deserialize(buf: &[u8]) -> Result<Self, StateError> {
        if buf.is_empty() {
            return Ok(Self::new());
        }
        if buf.len() < HEADER_LEN {
            return Err(StateError::TruncatedHeader {
                len: buf.len(),
                header: HEADER_LEN,
            });
        }

        let body = &buf[HEADER_LEN..];
        let trailing = body.len() % LEVEL_LEN;
        if trailing != 0 {
            return Err(StateError::MisalignedLevels { trailing });
        }

        let pending = PendingEmission::new(
            read_u32(&buf[0..4]),
            read_u32(&buf[4..8]),
            read_flag(buf, SUPPRESS_FLAG)?,
        );

        // Stored innermost first; the stack wants outermost first.
        let mut levels: Vec<IndentLevel> = body.chunks_exact(LEVEL_LEN).map(read_u32).collect();
        levels.reverse();

        Ok(Self {
            layout: LayoutStack::from_levels(levels),
            pending,
            eof_semicolon_emitted: read_flag(buf, EOF_FLAG)?,
            push_after_open_brace: read_flag(buf, PUSH_FLAG)?,
        })
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut raw = [0; 4];
    raw.copy_from_slice(bytes);
    u32::from_le_bytes(raw)
}

fn read_flag(buf: &[u8], offset: usize) -> Result<bool, StateError> {
    match buf[offset] {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(StateError::InvalidFlag { offset, value }),
    }
}
