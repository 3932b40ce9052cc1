//! Bounded cursor over an immutable source buffer.
//!
//! # Return convention
//!
//! Every scanner is entered with the cursor on the first byte of its token
//! and, on success, leaves it on the **last byte it consumed**, not one past
//! it. The enclosing loop steps over that byte itself and resumes scanning.
//! On failure the cursor is left on the offending byte, or at `end` when the
//! input ran out, so the position can be reported.

use crate::error::{ParseError, ParseErrorKind};

/// A position within `buf`, paired with a fixed end bound.
///
/// The cursor is [`Copy`]; sub-scans such as multi-line interpolation take a
/// tighter-bounded copy with [`Cursor::bounded`].
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor at the start of `buf`, bounded by its length.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            end: buf.len(),
        }
    }

    /// Cursor at `pos` within `buf`.
    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self {
            buf,
            pos: pos.min(buf.len()),
            end: buf.len(),
        }
    }

    /// Copy of this cursor that stops at `end`.
    ///
    /// The bound can only shrink.
    pub fn bounded(self, end: usize) -> Self {
        let end = end.min(self.end);
        Self {
            buf: self.buf,
            pos: self.pos.min(end),
            end,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move to `pos`, clamped to the end bound.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.end);
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// Byte under the cursor, `None` at the end bound.
    pub fn current(&self) -> Option<u8> {
        self.byte(self.pos)
    }

    /// Byte at `index`, `None` at or past the end bound.
    #[inline]
    pub fn byte(&self, index: usize) -> Option<u8> {
        if index < self.end {
            Some(self.buf[index])
        } else {
            None
        }
    }

    pub fn advance(&mut self) {
        if self.pos < self.end {
            self.pos += 1;
        }
    }

    /// Length of the run of `byte` starting at `index`.
    pub fn run_length(&self, index: usize, byte: u8) -> usize {
        let mut len = 0;
        while self.byte(index + len) == Some(byte) {
            len += 1;
        }
        len
    }

    /// Bytes in `from..to`. Both bounds must lie within the buffer.
    pub fn slice(&self, from: usize, to: usize) -> &'a [u8] {
        &self.buf[from..to]
    }

    /// Leave the cursor at `at` and build the matching error.
    pub(crate) fn fail(&mut self, at: usize, kind: ParseErrorKind) -> ParseError {
        self.set_pos(at);
        ParseError::new(kind, self.pos)
    }
}
