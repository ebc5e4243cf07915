//! Text position and range types.
//!
//! All coordinates are **0-indexed**. Line 0 is the first line, offset 0 is
//! before the first character. Offsets count Unicode scalar values (chars),
//! not bytes or grapheme clusters.
//!
//! Display layers (status line, error messages) convert to 1-indexed for the
//! user — that conversion never belongs in the arithmetic here.

use std::fmt;

use crate::buffer::Buffer;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A caret location in a buffer: (line, offset), both 0-indexed.
///
/// `offset` ranges over `0..=line_len`. The value equal to the line's length
/// is the slot after the last character.
///
/// # Ordering
///
/// Positions are ordered lexicographically: line first, then offset. This is
/// document order, so `Position { line: 0, offset: 5 }` <
/// `Position { line: 1, offset: 0 }`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub offset: usize,
}

impl Position {
    /// The document start — line 0, offset 0.
    pub const ZERO: Self = Self { line: 0, offset: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    /// True when both line and offset are zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.line == 0 && self.offset == 0
    }

    /// The position `delta` characters away in `buf` (negative = backward).
    ///
    /// Each line break between two lines counts as exactly one character.
    /// Movement stops at the buffer's start or end instead of failing, so the
    /// result may be closer than `|delta|` characters.
    ///
    /// # Errors
    ///
    /// [`EditError::OutOfBounds`](crate::error::EditError::OutOfBounds) if `self` is not
    /// a position in `buf`.
    pub fn step(self, buf: &Buffer, delta: isize) -> Result<Self> {
        let mut line_len = buf.check(self)?;
        let mut pos = self;
        let mut remaining = delta.unsigned_abs();

        if delta >= 0 {
            loop {
                let take = (line_len - pos.offset).min(remaining);
                pos.offset += take;
                remaining -= take;
                if remaining == 0 || pos.line + 1 >= buf.line_count() {
                    break;
                }
                // The line break itself.
                remaining -= 1;
                pos.line += 1;
                pos.offset = 0;
                line_len = buf.line_len(pos.line).unwrap_or(0);
            }
        } else {
            loop {
                let take = pos.offset.min(remaining);
                pos.offset -= take;
                remaining -= take;
                if remaining == 0 || pos.line == 0 {
                    break;
                }
                remaining -= 1;
                pos.line -= 1;
                pos.offset = buf.line_len(pos.line).unwrap_or(0);
            }
        }

        Ok(pos)
    }
}

// Natural ordering: line first, then offset.
impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.offset.cmp(&other.offset))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for humans.
        write!(f, "{}:{}", self.line + 1, self.offset + 1)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open range in a buffer: `[start, end)`.
///
/// Always normalized so that `start <= end` — build one with
/// [`Range::ordered`] from an anchor/focus pair, or [`Range::new`] when the
/// order is already known.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.line < end.line || (start.line == end.line && start.offset <= end.offset),
            "Range::new requires start <= end"
        );
        Self { start, end }
    }

    /// Create a range from two arbitrary positions, swapping if needed. A
    /// selection dragged backwards has its focus before its anchor.
    #[inline]
    #[must_use]
    pub fn ordered(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range at the given position.
    #[inline]
    #[must_use]
    pub const fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// True when the range spans zero characters.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.line == self.end.line && self.start.offset == self.end.offset
    }

    /// True when the given position falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Number of lines this range touches. An empty range sits on one line.
    #[inline]
    #[must_use]
    pub const fn line_span(self) -> usize {
        self.end.line - self.start.line + 1
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range({}:{} .. {}:{})",
            self.start.line, self.start.offset, self.end.line, self.end.offset
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
