//! Selection state — supplied by the host with every intent.
//!
//! The engine keeps no caret of its own between intents. The host reports the
//! current anchor and focus each time; the anchor is the end that stays put,
//! the focus is the end that moved. When they coincide the selection is a
//! plain caret.
//!
//! Hosts that support several disjoint ranges report how many they currently
//! have. Only a single range is editable; anything else is rejected before the
//! buffer is touched.

use crate::position::{Position, Range};

/// Anchor/focus pair in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor: Position,
    pub focus: Position,
    /// Number of disjoint ranges the host reports. Values above 1 make every
    /// intent bounce.
    pub range_count: usize,
}

impl SelectionState {
    /// A collapsed selection at `pos`.
    #[inline]
    #[must_use]
    pub const fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            focus: pos,
            range_count: 1,
        }
    }

    /// A selection from `anchor` to `focus`, in either direction.
    #[inline]
    #[must_use]
    pub const fn span(anchor: Position, focus: Position) -> Self {
        Self {
            anchor,
            focus,
            range_count: 1,
        }
    }

    /// The same selection with a different reported range count.
    #[inline]
    #[must_use]
    pub const fn with_range_count(mut self, range_count: usize) -> Self {
        self.range_count = range_count;
        self
    }

    /// True when anchor and focus coincide.
    #[inline]
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// True when the host reported more than one disjoint range.
    #[inline]
    #[must_use]
    pub const fn is_multi_range(&self) -> bool {
        self.range_count > 1
    }

    /// The selected range, start before end regardless of drag direction.
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range {
        Range::ordered(self.anchor, self.focus)
    }
}

/// Anchor/focus pair in view coordinates, before resolution.
///
/// `L` is whatever the host uses to point into its presentation. See
/// [`Resolve`](crate::view::Resolve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSelection<L> {
    pub anchor: L,
    pub focus: L,
    pub range_count: usize,
}

impl<L: Clone> ViewSelection<L> {
    /// A collapsed selection at `at`.
    #[must_use]
    pub fn caret(at: L) -> Self {
        Self {
            anchor: at.clone(),
            focus: at,
            range_count: 1,
        }
    }

    /// A selection from `anchor` to `focus`.
    #[must_use]
    pub const fn span(anchor: L, focus: L) -> Self {
        Self {
            anchor,
            focus,
            range_count: 1,
        }
    }
}
