//! Reversible edit records.
//!
//! A [`Change`] is the canonical description of one buffer mutation: what
//! kind, which text, and where it starts. The position plus the exact text is
//! enough to reconstruct both the forward and the reverse operation, so undo
//! is just "apply the inverse".
//!
//! Inversion is only sound while nobody else has touched the buffer between
//! the original edit and its replay. The engine is the only writer, so that
//! holds by construction.

use crate::buffer::Buffer;
use crate::error::Result;
use crate::position::Position;

/// Which way a [`Change`] moves text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// `text` was inserted at `position`.
    Insert,
    /// `text` was removed starting at `position`.
    Remove,
}

impl ChangeKind {
    /// The opposite kind.
    #[inline]
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Insert => Self::Remove,
            Self::Remove => Self::Insert,
        }
    }
}

/// A single reversible buffer edit.
///
/// For an insert, `text` is exactly what went in; for a remove, exactly what
/// came out. Either may span lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub text: String,
    pub position: Position,
}

impl Change {
    /// An insert of `text` at `position`.
    #[must_use]
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Insert,
            text: text.into(),
            position,
        }
    }

    /// A removal of `text` that started at `position`.
    #[must_use]
    pub fn remove(position: Position, text: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Remove,
            text: text.into(),
            position,
        }
    }

    /// The change that undoes this one: same text, same position, opposite
    /// kind.
    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            kind: self.kind.inverse(),
            text: self.text.clone(),
            position: self.position,
        }
    }

    /// The position where `text` ends when laid down at `position`.
    ///
    /// For an insert that's where the caret lands afterwards; for a remove
    /// it's the exclusive end of the removed span before removal.
    #[must_use]
    pub fn end(&self) -> Position {
        let mut end = self.position;
        for ch in self.text.chars() {
            if ch == '\n' {
                end.line += 1;
                end.offset = 0;
            } else {
                end.offset += 1;
            }
        }
        end
    }

    /// Replay this change on `buf`, returning where the caret belongs:
    /// the end of an insert, the start of a removal.
    ///
    /// # Errors
    ///
    /// Propagates the buffer's bounds errors. These only occur if `buf` is not
    /// in the state the change was recorded against.
    pub fn apply(&self, buf: &mut Buffer) -> Result<Position> {
        match self.kind {
            ChangeKind::Insert => buf.insert(self.position, &self.text),
            ChangeKind::Remove => {
                buf.remove(self.position, self.end())?;
                Ok(self.position)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
